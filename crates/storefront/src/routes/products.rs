//! Catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use patel_yarn_core::ProductId;

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::models::Product;
use crate::state::AppState;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Stock check query parameters.
#[derive(Debug, Deserialize)]
pub struct StockQuery {
    pub qty: u32,
}

/// Stock check response.
#[derive(Debug, Serialize)]
pub struct StockResponse {
    pub available: bool,
}

/// Maximum number of search hits returned.
const SEARCH_LIMIT: i64 = 10;

/// List all visible products.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list_visible().await?;
    Ok(Json(products))
}

/// Product detail. Hidden products are not found.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .get_visible(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("product".to_string()))?;

    Ok(Json(product))
}

/// Simple substring search over name, brand, category, and yarn weight.
///
/// Queries under two characters return nothing rather than the whole
/// catalog.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Product>>> {
    let term = query.q.unwrap_or_default();
    let term = term.trim();
    if term.len() < 2 {
        return Ok(Json(Vec::new()));
    }

    let products = ProductRepository::new(state.pool())
        .search(term, SEARCH_LIMIT)
        .await?;

    Ok(Json(products))
}

/// Check whether `qty` units of a product can be fulfilled from stock.
#[instrument(skip(state))]
pub async fn stock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<StockQuery>,
) -> Result<Json<StockResponse>> {
    let available = ProductRepository::new(state.pool())
        .get_visible(ProductId::new(id))
        .await?
        .is_some_and(|p| p.has_stock(query.qty));

    Ok(Json(StockResponse { available }))
}
