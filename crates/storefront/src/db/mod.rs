//! Database operations for the storefront `PostgreSQL`.
//!
//! ## Tables
//!
//! - `users` - Customers keyed by phone number
//! - `products` - The yarn catalog
//! - `orders` / `order_lines` - Fulfilled orders, keyed by gateway order id
//! - `sessions` - tower-sessions storage
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p patel-yarn-cli -- migrate
//! ```
//!
//! All queries use the sqlx runtime API with explicit binds; repositories
//! convert rows into the domain types in [`crate::models`].

pub mod orders;
pub mod products;
pub mod users;

pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use users::UserRepository;

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

    /// A uniqueness constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),

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
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
