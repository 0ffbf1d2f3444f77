//! Order repository for database operations.
//!
//! Orders are keyed by the gateway-issued order id. The order and all of its
//! lines are inserted in one transaction; a duplicate id maps to
//! `RepositoryError::Conflict` so a retried fulfillment call cannot create a
//! second order for the same gateway transaction.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use patel_yarn_core::{OrderId, ProductId, Rupees, UserId};

use super::RepositoryError;
use crate::models::{Order, OrderLine};

/// Database row for an order.
#[derive(sqlx::FromRow)]
struct OrderRow {
    id: String,
    user_id: i32,
    price_paid: i64,
    payment_id: String,
    paid: bool,
    complete: bool,
    created_at: DateTime<Utc>,
}

/// Database row for an order line.
#[derive(sqlx::FromRow)]
struct OrderLineRow {
    order_id: String,
    product_id: i32,
    quantity: i32,
}

impl OrderRow {
    fn into_order(self, lines: Vec<OrderLine>) -> Order {
        Order {
            id: OrderId::new(self.id),
            user_id: UserId::new(self.user_id),
            price_paid: Rupees::new(self.price_paid),
            payment_id: self.payment_id,
            paid: self.paid,
            complete: self.complete,
            created_at: self.created_at,
            lines,
        }
    }
}

const ORDER_COLUMNS: &str = "id, user_id, price_paid, payment_id, paid, complete, created_at";

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an order and all of its lines atomically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if an order with this gateway id
    /// already exists (retried fulfillment).
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_with_lines(
        &self,
        id: &OrderId,
        user_id: UserId,
        price_paid: Rupees,
        payment_id: &str,
        lines: &[(ProductId, i32)],
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO orders (id, user_id, price_paid, payment_id) VALUES ($1, $2, $3, $4)",
        )
        .bind(id.as_str())
        .bind(user_id.as_i32())
        .bind(price_paid.as_i64())
        .bind(payment_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("order already recorded".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        for (product_id, quantity) in lines {
            sqlx::query(
                "INSERT INTO order_lines (order_id, product_id, quantity) VALUES ($1, $2, $3)",
            )
            .bind(id.as_str())
            .bind(product_id.as_i32())
            .bind(*quantity)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Idempotently mark an order as paid.
    ///
    /// Returns `true` if an order with this gateway id exists (whether or not
    /// it was already paid), `false` if no such order has been recorded yet.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn mark_paid(&self, id: &OrderId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE orders SET paid = TRUE WHERE id = $1")
            .bind(id.as_str())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Get an order with its lines.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError> {
        let row: Option<OrderRow> =
            sqlx::query_as(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"))
                .bind(id.as_str())
                .fetch_optional(self.pool)
                .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let lines: Vec<OrderLineRow> = sqlx::query_as(
            "SELECT order_id, product_id, quantity FROM order_lines WHERE order_id = $1",
        )
        .bind(id.as_str())
        .fetch_all(self.pool)
        .await?;

        let lines = lines
            .into_iter()
            .map(|l| OrderLine {
                product_id: ProductId::new(l.product_id),
                quantity: l.quantity,
            })
            .collect();

        Ok(Some(row.into_order(lines)))
    }

    /// List a user's orders with their lines, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let rows: Vec<OrderRow> = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        let line_rows: Vec<OrderLineRow> = sqlx::query_as(
            "SELECT l.order_id, l.product_id, l.quantity \
             FROM order_lines l JOIN orders o ON o.id = l.order_id \
             WHERE o.user_id = $1",
        )
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        let orders = rows
            .into_iter()
            .map(|row| {
                let lines = line_rows
                    .iter()
                    .filter(|l| l.order_id == row.id)
                    .map(|l| OrderLine {
                        product_id: ProductId::new(l.product_id),
                        quantity: l.quantity,
                    })
                    .collect();
                row.into_order(lines)
            })
            .collect();

        Ok(orders)
    }
}
