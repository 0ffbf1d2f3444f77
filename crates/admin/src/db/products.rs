//! Catalog write operations.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use patel_yarn_core::{ProductId, Rupees};

use super::RepositoryError;

/// A catalog product as the back office sees it (hidden products included).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AdminProduct {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub brand: String,
    pub category: String,
    pub price: i64,
    pub stock: i32,
    pub visible: bool,
    pub yarn_weight: String,
    pub grams_per_unit: i32,
    pub color: String,
    pub image_url: String,
    pub image_url2: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AdminProduct {
    /// The unit price in rupees.
    #[must_use]
    pub const fn price_rupees(&self) -> Rupees {
        Rupees::new(self.price)
    }
}

/// Validated fields for creating or updating a product.
#[derive(Debug, Clone)]
pub struct ProductFields<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub brand: &'a str,
    pub category: &'a str,
    pub price: i64,
    pub stock: i32,
    pub yarn_weight: &'a str,
    pub grams_per_unit: i32,
    pub color: &'a str,
    pub image_url: &'a str,
    pub image_url2: &'a str,
}

const PRODUCT_COLUMNS: &str = "id, name, description, brand, category, price, stock, visible, \
     yarn_weight, grams_per_unit, color, image_url, image_url2, created_at, updated_at";

/// Repository for catalog writes.
pub struct ProductAdminRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductAdminRepository<'a> {
    /// Create a new repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the whole catalog, hidden products included, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<AdminProduct>, RepositoryError> {
        let products = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<AdminProduct>, RepositoryError> {
        let product = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        fields: &ProductFields<'_>,
    ) -> Result<AdminProduct, RepositoryError> {
        let product = sqlx::query_as(&format!(
            "INSERT INTO products \
             (name, description, brand, category, price, stock, yarn_weight, grams_per_unit, \
              color, image_url, image_url2) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(fields.name)
        .bind(fields.description)
        .bind(fields.brand)
        .bind(fields.category)
        .bind(fields.price)
        .bind(fields.stock)
        .bind(fields.yarn_weight)
        .bind(fields.grams_per_unit)
        .bind(fields.color)
        .bind(fields.image_url)
        .bind(fields.image_url2)
        .fetch_one(self.pool)
        .await?;

        Ok(product)
    }

    /// Update a product in place.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ProductId,
        fields: &ProductFields<'_>,
    ) -> Result<AdminProduct, RepositoryError> {
        let product = sqlx::query_as(&format!(
            "UPDATE products SET \
             name = $2, description = $3, brand = $4, category = $5, price = $6, stock = $7, \
             yarn_weight = $8, grams_per_unit = $9, color = $10, image_url = $11, \
             image_url2 = $12, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id.as_i32())
        .bind(fields.name)
        .bind(fields.description)
        .bind(fields.brand)
        .bind(fields.category)
        .bind(fields.price)
        .bind(fields.stock)
        .bind(fields.yarn_weight)
        .bind(fields.grams_per_unit)
        .bind(fields.color)
        .bind(fields.image_url)
        .bind(fields.image_url2)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(product)
    }

    /// Delete a product.
    ///
    /// Returns `true` if the product existed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails (including a
    /// foreign-key violation when order lines reference the product).
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Set a product's storefront visibility.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_visible(&self, id: ProductId, visible: bool) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("UPDATE products SET visible = $2, updated_at = NOW() WHERE id = $1")
                .bind(id.as_i32())
                .bind(visible)
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
