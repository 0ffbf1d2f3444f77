//! Order management operations.
//!
//! Status transitions are idempotent single-field sets: `paid` may also be
//! written by the storefront's webhook path, and the two writers are safe
//! under arbitrary interleaving because both only ever set the flag.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use patel_yarn_core::{OrderId, Phone, PhoneError, ProductId, UserId};

use super::RepositoryError;

/// An order row joined with its customer, as listed in the back office.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AdminOrder {
    pub id: OrderId,
    pub user_id: UserId,
    pub user_name: String,
    pub user_phone: String,
    pub user_address: String,
    pub user_pincode: i32,
    pub price_paid: i64,
    pub payment_id: String,
    pub paid: bool,
    pub complete: bool,
    pub created_at: DateTime<Utc>,
}

impl AdminOrder {
    /// The customer's phone as a validated domain type.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the stored phone is
    /// invalid.
    pub fn phone(&self) -> Result<Phone, RepositoryError> {
        Phone::parse(&self.user_phone).map_err(|e: PhoneError| {
            RepositoryError::DataCorruption(format!("invalid phone in database: {e}"))
        })
    }
}

/// An order line joined with its product, for the detail view.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AdminOrderLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub unit_price: i64,
    pub quantity: i32,
}

/// An order with its lines.
#[derive(Debug, Clone, Serialize)]
pub struct AdminOrderDetail {
    #[serde(flatten)]
    pub order: AdminOrder,
    pub lines: Vec<AdminOrderLine>,
}

const ORDER_COLUMNS: &str = "o.id, o.user_id, u.name AS user_name, u.phone AS user_phone, \
     u.address AS user_address, u.pincode AS user_pincode, o.price_paid, o.payment_id, \
     o.paid, o.complete, o.created_at";

/// Repository for order management.
pub struct OrderAdminRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderAdminRepository<'a> {
    /// Create a new repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all orders with their customers, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<AdminOrder>, RepositoryError> {
        let orders = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders o \
             JOIN users u ON u.id = o.user_id \
             ORDER BY o.created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }

    /// Get one order with its customer and lines.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: &OrderId) -> Result<Option<AdminOrderDetail>, RepositoryError> {
        let order: Option<AdminOrder> = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders o \
             JOIN users u ON u.id = o.user_id \
             WHERE o.id = $1"
        ))
        .bind(id.as_str())
        .fetch_optional(self.pool)
        .await?;

        let Some(order) = order else {
            return Ok(None);
        };

        let lines = sqlx::query_as(
            "SELECT l.product_id, p.name AS product_name, p.price AS unit_price, l.quantity \
             FROM order_lines l \
             JOIN products p ON p.id = l.product_id \
             WHERE l.order_id = $1",
        )
        .bind(id.as_str())
        .fetch_all(self.pool)
        .await?;

        Ok(Some(AdminOrderDetail { order, lines }))
    }

    /// Set the `complete` flag. Idempotent.
    ///
    /// Returns the updated order (with customer, for the outbound
    /// notification).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_complete(
        &self,
        id: &OrderId,
        complete: bool,
    ) -> Result<AdminOrder, RepositoryError> {
        let result = sqlx::query("UPDATE orders SET complete = $2 WHERE id = $1")
            .bind(id.as_str())
            .bind(complete)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        let order: Option<AdminOrder> = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders o \
             JOIN users u ON u.id = o.user_id \
             WHERE o.id = $1"
        ))
        .bind(id.as_str())
        .fetch_optional(self.pool)
        .await?;

        order.ok_or(RepositoryError::NotFound)
    }

    /// Set the `paid` flag. Idempotent; manual override of the webhook path.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_paid(&self, id: &OrderId, paid: bool) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE orders SET paid = $2 WHERE id = $1")
            .bind(id.as_str())
            .bind(paid)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
