//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::StorefrontConfig;
use crate::razorpay::RazorpayClient;
use crate::services::{OtpStore, WhatsAppClient, WhatsAppError};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; provides access to the database pool,
/// configuration, external-service clients, and the OTP store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    razorpay: RazorpayClient,
    whatsapp: WhatsAppClient,
    otp_store: OtpStore,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the WhatsApp client cannot be built.
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Result<Self, WhatsAppError> {
        let razorpay = RazorpayClient::new(&config.razorpay);
        let whatsapp = WhatsAppClient::new(&config.whatsapp)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                razorpay,
                whatsapp,
                otp_store: OtpStore::new(),
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the Razorpay client.
    #[must_use]
    pub fn razorpay(&self) -> &RazorpayClient {
        &self.inner.razorpay
    }

    /// Get a reference to the WhatsApp client.
    #[must_use]
    pub fn whatsapp(&self) -> &WhatsAppClient {
        &self.inner.whatsapp
    }

    /// Get a reference to the OTP store.
    #[must_use]
    pub fn otp_store(&self) -> &OtpStore {
        &self.inner.otp_store
    }
}
