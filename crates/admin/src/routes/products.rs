//! Catalog management route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use patel_yarn_core::ProductId;

use crate::db::{ProductAdminRepository, RepositoryError};
use crate::db::products::{AdminProduct, ProductFields};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Product create/update form.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub brand: String,
    pub category: String,
    /// Unit price in whole rupees.
    pub price: i64,
    pub stock: i32,
    pub yarn_weight: String,
    pub grams_per_unit: i32,
    pub color: String,
    pub image_url: String,
    pub image_url2: String,
}

impl ProductForm {
    /// Validate bounds and required fields, returning borrowed fields for
    /// the repository.
    fn validate(&self) -> Result<ProductFields<'_>> {
        let required = [
            ("name", &self.name),
            ("description", &self.description),
            ("brand", &self.brand),
            ("category", &self.category),
            ("yarn_weight", &self.yarn_weight),
            ("color", &self.color),
            ("image_url", &self.image_url),
            ("image_url2", &self.image_url2),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{field} is required")));
            }
        }

        if self.price < 1 {
            return Err(AppError::Validation("price must be at least 1".to_string()));
        }
        if self.stock < 0 {
            return Err(AppError::Validation("stock cannot be negative".to_string()));
        }
        if self.grams_per_unit < 100 {
            return Err(AppError::Validation(
                "grams_per_unit must be at least 100".to_string(),
            ));
        }

        Ok(ProductFields {
            name: self.name.trim(),
            description: self.description.trim(),
            brand: self.brand.trim(),
            category: self.category.trim(),
            price: self.price,
            stock: self.stock,
            yarn_weight: self.yarn_weight.trim(),
            grams_per_unit: self.grams_per_unit,
            color: self.color.trim(),
            image_url: self.image_url.trim(),
            image_url2: self.image_url2.trim(),
        })
    }
}

/// Visibility toggle form.
#[derive(Debug, Deserialize)]
pub struct VisibilityForm {
    pub visible: bool,
}

/// Deletion acknowledgement.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// The whole catalog, hidden products included.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<AdminProduct>>> {
    let products = ProductAdminRepository::new(state.pool()).list().await?;
    Ok(Json(products))
}

/// Product detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<AdminProduct>> {
    let product = ProductAdminRepository::new(state.pool())
        .get(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("product".to_string()))?;

    Ok(Json(product))
}

/// Create a product.
#[instrument(skip(state, form))]
pub async fn create(
    State(state): State<AppState>,
    Json(form): Json<ProductForm>,
) -> Result<Json<AdminProduct>> {
    let fields = form.validate()?;

    let product = ProductAdminRepository::new(state.pool())
        .create(&fields)
        .await?;

    tracing::info!(product_id = %product.id, name = %product.name, "product created");

    Ok(Json(product))
}

/// Update a product in place.
#[instrument(skip(state, form))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(form): Json<ProductForm>,
) -> Result<Json<AdminProduct>> {
    let fields = form.validate()?;

    let product = ProductAdminRepository::new(state.pool())
        .update(ProductId::new(id), &fields)
        .await?;

    tracing::info!(product_id = %product.id, "product updated");

    Ok(Json(product))
}

/// Delete a product.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DeleteResponse>> {
    let deleted = ProductAdminRepository::new(state.pool())
        .delete(ProductId::new(id))
        .await
        .map_err(|e| match e {
            RepositoryError::Database(sqlx::Error::Database(ref db_err))
                if db_err.is_foreign_key_violation() =>
            {
                AppError::Validation(
                    "product appears on existing orders; hide it instead".to_string(),
                )
            }
            other => AppError::Database(other),
        })?;

    if !deleted {
        return Err(AppError::NotFound("product".to_string()));
    }

    tracing::info!(product_id = id, "product deleted");

    Ok(Json(DeleteResponse { success: true }))
}

/// Set a product's storefront visibility.
#[instrument(skip(state))]
pub async fn set_visibility(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(form): Json<VisibilityForm>,
) -> Result<Json<AdminProduct>> {
    let repo = ProductAdminRepository::new(state.pool());
    repo.set_visible(ProductId::new(id), form.visible).await?;

    let product = repo
        .get(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("product".to_string()))?;

    tracing::info!(product_id = id, visible = form.visible, "visibility changed");

    Ok(Json(product))
}
