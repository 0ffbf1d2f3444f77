//! Database operations for the back office.
//!
//! The admin service points at the same `PostgreSQL` database as the
//! storefront (the catalog and orders are shared state); it simply holds
//! the write side of the catalog and the order status transitions.

pub mod orders;
pub mod products;

pub use orders::OrderAdminRepository;
pub use products::ProductAdminRepository;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

/// Errors returned by the repository layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The underlying database operation failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The requested record does not exist.
    #[error("record not found")]
    NotFound,

    /// A stored value failed domain validation on read.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
