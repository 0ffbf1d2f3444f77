//! Cart route handlers.
//!
//! The cart itself is a pure collection (`patel_yarn_core::cart`); these
//! handlers load it from the session, apply one mutation, and persist it
//! back, so the cart survives reloads without any client-side storage.
//!
//! Unit prices are snapshotted from the catalog on insert. Stock is checked
//! here, at the boundary - the cart deliberately does not enforce a ceiling.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use patel_yarn_core::{Cart, ProductId, Rupees};

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::models::session_keys;
use crate::state::AppState;

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub product_id: ProductId,
    pub unit_price: Rupees,
    pub quantity: u32,
    pub line_total: Rupees,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total_price: Rupees,
    pub item_count: u32,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart
                .items()
                .iter()
                .map(|i| CartItemView {
                    product_id: i.product_id,
                    unit_price: i.unit_price,
                    quantity: i.quantity,
                    line_total: i.unit_price.times(i.quantity),
                })
                .collect(),
            total_price: cart.total_price(),
            item_count: cart.item_count(),
        }
    }
}

/// Cart count badge data.
#[derive(Debug, Serialize)]
pub struct CartCountView {
    pub count: u32,
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the cart from the session, or an empty one.
async fn get_cart(session: &Session) -> Result<Cart> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Persist the cart to the session.
async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

/// Remove the cart from the session entirely.
pub(crate) async fn drop_cart(session: &Session) -> Result<()> {
    session.remove::<Cart>(session_keys::CART).await?;
    Ok(())
}

/// Add-to-cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: i32,
    pub quantity: Option<u32>,
}

/// Update-quantity form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub product_id: i32,
    pub quantity: u32,
}

/// Remove-from-cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub product_id: i32,
}

/// Current cart contents.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<CartView>> {
    let cart = get_cart(&session).await?;
    Ok(Json(CartView::from(&cart)))
}

/// Cart item count.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<Json<CartCountView>> {
    let cart = get_cart(&session).await?;
    Ok(Json(CartCountView {
        count: cart.item_count(),
    }))
}

/// Add units of a product to the cart.
///
/// Increments the existing entry if the product is already present.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let quantity = form.quantity.unwrap_or(1);
    let product_id = ProductId::new(form.product_id);

    let product = ProductRepository::new(state.pool())
        .get_visible(product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("product".to_string()))?;

    let mut cart = get_cart(&session).await?;

    let wanted = cart.quantity_of(product_id) + quantity;
    if !product.has_stock(wanted) {
        return Err(AppError::Validation(format!(
            "only {} in stock",
            product.stock
        )));
    }

    cart.add_product(product_id, product.price, quantity);
    save_cart(&session, &cart).await?;

    Ok(Json(CartView::from(&cart)))
}

/// Set a product's quantity to an absolute value (0 removes it).
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<UpdateCartRequest>,
) -> Result<Json<CartView>> {
    let product_id = ProductId::new(form.product_id);

    let product = ProductRepository::new(state.pool())
        .get_visible(product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("product".to_string()))?;

    if form.quantity > 0 && !product.has_stock(form.quantity) {
        return Err(AppError::Validation(format!(
            "only {} in stock",
            product.stock
        )));
    }

    let mut cart = get_cart(&session).await?;
    cart.set_quantity(product_id, product.price, form.quantity);
    save_cart(&session, &cart).await?;

    Ok(Json(CartView::from(&cart)))
}

/// Remove a product from the cart. Idempotent.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Json(form): Json<RemoveFromCartRequest>,
) -> Result<Json<CartView>> {
    let mut cart = get_cart(&session).await?;
    cart.remove_product(ProductId::new(form.product_id));
    save_cart(&session, &cart).await?;

    Ok(Json(CartView::from(&cart)))
}

/// Clear the cart.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Json<CartView>> {
    drop_cart(&session).await?;
    Ok(Json(CartView::from(&Cart::new())))
}
