//! HTTP route handlers for the back office.
//!
//! # Route Structure (all behind HTTP Basic auth)
//!
//! ```text
//! GET  /health                          - Liveness check
//! GET  /health/ready                    - Readiness check (DB ping)
//!
//! # Catalog
//! GET    /api/products                  - Whole catalog, hidden included
//! POST   /api/products                  - Create product
//! GET    /api/products/{id}             - Product detail
//! PUT    /api/products/{id}             - Update product
//! DELETE /api/products/{id}             - Delete product
//! POST   /api/products/{id}/visibility  - Set storefront visibility
//!
//! # Orders
//! GET  /api/orders                      - All orders with customers
//! GET  /api/orders/{id}                 - Order detail with lines
//! POST /api/orders/{id}/complete       - Set shipped flag (+ WhatsApp notice)
//! POST /api/orders/{id}/paid            - Manual payment-flag override
//! ```

pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the catalog routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route(
            "/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::delete),
        )
        .route("/{id}/visibility", post(products::set_visibility))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}", get(orders::show))
        .route("/{id}/complete", post(orders::set_complete))
        .route("/{id}/paid", post(orders::set_paid))
}

/// Create all routes for the back office.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/products", product_routes())
        .nest("/api/orders", order_routes())
}
