//! Product repository for catalog reads.
//!
//! The storefront only reads the catalog; all writes happen through the
//! admin service.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use patel_yarn_core::{ProductId, Rupees};

use super::RepositoryError;
use crate::models::Product;

/// Database row for a product.
#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    description: String,
    brand: String,
    category: String,
    price: i64,
    stock: i32,
    visible: bool,
    yarn_weight: String,
    grams_per_unit: i32,
    color: String,
    image_url: String,
    image_url2: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(r: ProductRow) -> Self {
        Self {
            id: ProductId::new(r.id),
            name: r.name,
            description: r.description,
            brand: r.brand,
            category: r.category,
            price: Rupees::new(r.price),
            stock: r.stock,
            visible: r.visible,
            yarn_weight: r.yarn_weight,
            grams_per_unit: r.grams_per_unit,
            color: r.color,
            image_url: r.image_url,
            image_url2: r.image_url2,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

const PRODUCT_COLUMNS: &str = "id, name, description, brand, category, price, stock, visible, \
     yarn_weight, grams_per_unit, color, image_url, image_url2, created_at, updated_at";

/// Repository for catalog reads.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all visible products, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_visible(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE visible ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Get a product by ID regardless of visibility.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> =
            sqlx::query_as(&format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"))
                .bind(id.as_i32())
                .fetch_optional(self.pool)
                .await?;

        Ok(row.map(Product::from))
    }

    /// Get a visible product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_visible(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 AND visible"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Product::from))
    }

    /// Case-insensitive substring search over name, brand, category, and
    /// yarn weight. Visible products only, capped at `limit`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn search(&self, term: &str, limit: i64) -> Result<Vec<Product>, RepositoryError> {
        let pattern = format!("%{}%", term.replace('%', "\\%").replace('_', "\\_"));

        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE visible AND (name ILIKE $1 OR brand ILIKE $1 OR category ILIKE $1 OR yarn_weight ILIKE $1) \
             ORDER BY name ASC LIMIT $2"
        ))
        .bind(pattern)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }
}
