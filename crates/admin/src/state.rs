//! Application state shared across admin handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AdminConfig;
use crate::services::{WhatsAppClient, WhatsAppError};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    pool: PgPool,
    whatsapp: WhatsAppClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the WhatsApp client cannot be built.
    pub fn new(config: AdminConfig, pool: PgPool) -> Result<Self, WhatsAppError> {
        let whatsapp = WhatsAppClient::new(&config.whatsapp)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                whatsapp,
            }),
        })
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the WhatsApp client.
    #[must_use]
    pub fn whatsapp(&self) -> &WhatsAppClient {
        &self.inner.whatsapp
    }
}
