//! Product domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use patel_yarn_core::{ProductId, Rupees};

/// A catalog product (a yarn SKU).
///
/// Owned by the catalog; mutated only through admin actions. The storefront
/// reads visible products only.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Long description.
    pub description: String,
    /// Brand name.
    pub brand: String,
    /// Category (e.g. "Acrylic", "Cotton").
    pub category: String,
    /// Unit price in whole rupees.
    pub price: Rupees,
    /// Units in stock.
    pub stock: i32,
    /// Whether the product is shown on the storefront.
    pub visible: bool,
    /// Yarn weight class (e.g. "Worsted", "DK").
    pub yarn_weight: String,
    /// Grams per unit (skein/ball weight).
    pub grams_per_unit: i32,
    /// Color name or hex.
    pub color: String,
    /// Primary image URL.
    pub image_url: String,
    /// Secondary image URL.
    pub image_url2: String,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Whether `qty` units can be fulfilled from stock.
    #[must_use]
    pub const fn has_stock(&self, qty: u32) -> bool {
        qty as i64 <= self.stock as i64
    }
}
