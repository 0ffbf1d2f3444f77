//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check (DB ping)
//!
//! # Catalog
//! GET  /api/products               - Visible products
//! GET  /api/products/search        - Simple substring search (?q=)
//! GET  /api/products/{id}          - Product detail
//! GET  /api/products/{id}/stock    - Stock sufficiency check (?qty=)
//!
//! # Cart (session-persisted)
//! GET    /api/cart                 - Current cart
//! GET    /api/cart/count           - Item count badge
//! POST   /api/cart/add             - Add units of a product
//! POST   /api/cart/update          - Set a product's quantity
//! POST   /api/cart/remove          - Remove a product
//! DELETE /api/cart                 - Clear the cart
//!
//! # Checkout & payment
//! POST /api/delivery               - Delivery charge for a pincode
//! POST /api/payment/order          - Create a gateway order (server-side amount)
//! POST /api/payment/verify         - Verify a client payment callback
//! POST /api/payment/webhook        - Gateway webhook (raw-body HMAC)
//! POST /api/orders                 - Record the order after payment (auth)
//! GET  /api/orders                 - Order history (auth)
//! GET  /api/orders/{id}            - Order confirmation view (auth, own orders)
//!
//! # Auth
//! POST /api/otp/request            - Issue and dispatch a login code
//! POST /auth/login                 - Exchange phone + code for a session
//! POST /auth/logout                - Clear the session
//!
//! # Account
//! GET  /account                    - Delivery details for the session phone (auth)
//! PUT  /account                    - Upsert delivery details (auth)
//! ```

pub mod account;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod products;
pub mod webhook;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the catalog routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/search", get(products::search))
        .route("/{id}", get(products::show))
        .route("/{id}/stock", get(products::stock))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).delete(cart::clear))
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
}

/// Create the payment routes router.
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/order", post(checkout::create_payment_order))
        .route("/verify", post(checkout::verify_payment))
        .route("/webhook", post(webhook::receive))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/products", product_routes())
        .nest("/api/cart", cart_routes())
        .nest("/api/payment", payment_routes())
        .route("/api/delivery", post(checkout::delivery))
        .route("/api/otp/request", post(auth::request_otp))
        .route("/api/orders", post(orders::fulfill).get(orders::history))
        .route("/api/orders/{id}", get(orders::show))
        .route("/account", get(account::show).put(account::upsert))
        .nest("/auth", auth_routes())
}
