//! Order domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use patel_yarn_core::{OrderId, ProductId, Rupees, UserId};

/// A paid-for order.
///
/// Keyed by the gateway-issued order id. Created atomically with its lines
/// after payment verification succeeds; afterwards only `paid` (webhook) and
/// `complete` (admin) flip. Never deleted in normal flow.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    /// Gateway-issued order id.
    pub id: OrderId,
    /// The customer who placed the order.
    pub user_id: UserId,
    /// Total amount paid, in whole rupees.
    pub price_paid: Rupees,
    /// Gateway payment reference id.
    pub payment_id: String,
    /// Set by the gateway's payment-captured webhook.
    pub paid: bool,
    /// Set by the back office once the order has shipped.
    pub complete: bool,
    /// When the order was recorded.
    pub created_at: DateTime<Utc>,
    /// The order's line items.
    pub lines: Vec<OrderLine>,
}

/// One line of an order.
#[derive(Debug, Clone, Serialize)]
pub struct OrderLine {
    /// The ordered product.
    pub product_id: ProductId,
    /// How many units.
    pub quantity: i32,
}
