//! HTTP Basic authentication for the back office.
//!
//! Every admin route sits behind this layer. The username must match the
//! configured one and the password must verify against the configured argon2
//! hash - the hash is salted, so the comparison happens through the argon2
//! verifier rather than by re-hashing and string equality.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use secrecy::ExposeSecret;

use crate::config::BasicAuthConfig;
use crate::state::AppState;

/// Reject with a challenge so browsers prompt for credentials.
fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Basic")],
        "Unauthorized",
    )
        .into_response()
}

/// Extract the username/password pair from a Basic `Authorization` header.
fn decode_basic(header_value: &str) -> Option<(String, String)> {
    let encoded = header_value.strip_prefix("Basic ")?;
    let decoded = BASE64.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_owned(), password.to_owned()))
}

/// Check credentials against the configured username and argon2 hash.
fn credentials_valid(config: &BasicAuthConfig, username: &str, password: &str) -> bool {
    if username != config.username {
        return false;
    }

    let Ok(parsed_hash) = PasswordHash::new(config.password_hash.expose_secret()) else {
        tracing::error!("ADMIN_PASSWORD_HASH is not a valid PHC string");
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Middleware requiring Basic credentials on every request.
pub async fn require_basic_auth(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let Some(header_value) = header_value else {
        return unauthorized();
    };

    let Some((username, password)) = decode_basic(header_value) else {
        return unauthorized();
    };

    if !credentials_valid(&state.config().basic_auth, &username, &password) {
        tracing::warn!(username = %username, "rejected admin credentials");
        return unauthorized();
    }

    next.run(request).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use argon2::PasswordHasher;
    use argon2::password_hash::SaltString;
    use argon2::password_hash::rand_core::OsRng;
    use secrecy::SecretString;

    use super::*;

    fn hash(password: &str) -> String {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .unwrap()
            .to_string()
    }

    fn config(username: &str, password: &str) -> BasicAuthConfig {
        BasicAuthConfig {
            username: username.to_owned(),
            password_hash: SecretString::from(hash(password)),
        }
    }

    #[test]
    fn test_decode_basic_valid() {
        let encoded = BASE64.encode("owner:hunter2");
        let (user, pass) = decode_basic(&format!("Basic {encoded}")).unwrap();
        assert_eq!(user, "owner");
        assert_eq!(pass, "hunter2");
    }

    #[test]
    fn test_decode_basic_password_may_contain_colon() {
        let encoded = BASE64.encode("owner:pass:with:colons");
        let (_, pass) = decode_basic(&format!("Basic {encoded}")).unwrap();
        assert_eq!(pass, "pass:with:colons");
    }

    #[test]
    fn test_decode_basic_rejects_garbage() {
        assert!(decode_basic("Bearer abcdef").is_none());
        assert!(decode_basic("Basic !!!not-base64!!!").is_none());
        assert!(decode_basic(&format!("Basic {}", BASE64.encode("no-colon"))).is_none());
    }

    #[test]
    fn test_credentials_valid_accepts_correct_pair() {
        let config = config("owner", "w0rsted-weight");
        assert!(credentials_valid(&config, "owner", "w0rsted-weight"));
    }

    #[test]
    fn test_credentials_valid_rejects_wrong_password() {
        let config = config("owner", "w0rsted-weight");
        assert!(!credentials_valid(&config, "owner", "fingering-weight"));
    }

    #[test]
    fn test_credentials_valid_rejects_wrong_username() {
        let config = config("owner", "w0rsted-weight");
        assert!(!credentials_valid(&config, "manager", "w0rsted-weight"));
    }

    #[test]
    fn test_credentials_valid_rejects_malformed_hash() {
        let config = BasicAuthConfig {
            username: "owner".to_owned(),
            password_hash: SecretString::from("not-a-phc-string"),
        };
        assert!(!credentials_valid(&config, "owner", "anything"));
    }
}
