//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ADMIN_DATABASE_URL` - `PostgreSQL` connection string (same database as
//!   the storefront)
//! - `ADMIN_USERNAME` - HTTP Basic username
//! - `ADMIN_PASSWORD_HASH` - argon2 PHC hash of the Basic password
//!   (generate with `patel-yarn-cli admin hash-password`)
//! - `WHATSAPP_PHONE_ID` - WhatsApp Cloud API phone number id
//! - `WHATSAPP_ACCESS_TOKEN` - WhatsApp Cloud API bearer token
//!
//! ## Optional
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// HTTP Basic credentials
    pub basic_auth: BasicAuthConfig,
    /// WhatsApp Cloud API configuration
    pub whatsapp: WhatsAppConfig,
}

/// HTTP Basic credential configuration.
///
/// Implements `Debug` manually to redact the hash.
#[derive(Clone)]
pub struct BasicAuthConfig {
    /// Expected username.
    pub username: String,
    /// argon2 PHC hash of the expected password.
    pub password_hash: SecretString,
}

impl std::fmt::Debug for BasicAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuthConfig")
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

/// WhatsApp Cloud API configuration.
#[derive(Clone)]
pub struct WhatsAppConfig {
    /// Cloud API phone number id (the sender)
    pub phone_id: String,
    /// Cloud API bearer token
    pub access_token: SecretString,
}

impl std::fmt::Debug for WhatsAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhatsAppConfig")
            .field("phone_id", &self.phone_id)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("ADMIN_DATABASE_URL")?;
        let host = get_env_or_default("ADMIN_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("ADMIN_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_PORT".to_string(), e.to_string()))?;

        let basic_auth = BasicAuthConfig::from_env()?;
        let whatsapp = WhatsAppConfig::from_env()?;

        Ok(Self {
            database_url,
            host,
            port,
            basic_auth,
            whatsapp,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl BasicAuthConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let username = get_required_env("ADMIN_USERNAME")?;
        let password_hash = get_required_env("ADMIN_PASSWORD_HASH")?;

        // A salted argon2 PHC string, not a bare digest of the password
        if !password_hash.starts_with("$argon2") {
            return Err(ConfigError::InvalidEnvVar(
                "ADMIN_PASSWORD_HASH".to_string(),
                "expected an argon2 PHC string (generate with `patel-yarn-cli admin hash-password`)"
                    .to_string(),
            ));
        }

        Ok(Self {
            username,
            password_hash: SecretString::from(password_hash),
        })
    }
}

impl WhatsAppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            phone_id: get_required_env("WHATSAPP_PHONE_ID")?,
            access_token: SecretString::from(get_required_env("WHATSAPP_ACCESS_TOKEN")?),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_auth_debug_redacts_hash() {
        let config = BasicAuthConfig {
            username: "owner".to_string(),
            password_hash: SecretString::from("$argon2id$v=19$m=19456,t=2,p=1$abc$def"),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("owner"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("argon2id"));
    }

    #[test]
    fn test_socket_addr() {
        let config = AdminConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "0.0.0.0".parse().unwrap(),
            port: 3001,
            basic_auth: BasicAuthConfig {
                username: "owner".to_string(),
                password_hash: SecretString::from("$argon2id$v=19$m=19456,t=2,p=1$abc$def"),
            },
            whatsapp: WhatsAppConfig {
                phone_id: "106540352242922".to_string(),
                access_token: SecretString::from("t0k3n"),
            },
        };

        let addr = config.socket_addr();
        assert_eq!(addr.port(), 3001);
    }

    #[test]
    fn test_password_hash_still_accessible() {
        use secrecy::ExposeSecret;

        let config = BasicAuthConfig {
            username: "owner".to_string(),
            password_hash: SecretString::from("$argon2id$v=19$m=19456,t=2,p=1$abc$def"),
        };
        assert!(config.password_hash.expose_secret().starts_with("$argon2"));
    }
}
