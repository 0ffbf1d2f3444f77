//! Checkout route handlers: delivery charge, gateway order creation, and
//! payment verification.
//!
//! The amount charged is computed here, server-side, from current catalog
//! prices plus the delivery charge - never from figures the client supplies.
//! The delivery charge is resolved once and threaded into both the response
//! (for display) and the gateway amount, so the two cannot disagree.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use patel_yarn_core::{Paise, Phone, ProductId, Rupees, delivery_charge};

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::razorpay::signature::payment_signature_valid;
use crate::state::AppState;

/// A cart line as submitted by the checkout client.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutLine {
    pub product_id: i32,
    pub quantity: u32,
}

/// Delivery charge request.
#[derive(Debug, Deserialize)]
pub struct DeliveryRequest {
    pub pincode: i32,
}

/// Delivery charge response.
#[derive(Debug, Serialize)]
pub struct DeliveryResponse {
    pub charge: Rupees,
}

/// Gateway order creation request.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub phone: String,
    pub cart_items: Vec<CheckoutLine>,
    pub pincode: i32,
}

/// Gateway order creation response.
///
/// `amount` is in paise, as the payment UI expects; `subtotal` and
/// `delivery_charge` are in rupees for display.
#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub order_id: String,
    pub amount: Paise,
    pub currency: &'static str,
    pub key_id: String,
    pub subtotal: Rupees,
    pub delivery_charge: Rupees,
}

/// Payment verification request (client success callback).
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

/// Payment verification response.
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub success: bool,
    pub order_id: String,
    pub payment_id: String,
}

/// Resolve the delivery charge for a pincode.
#[instrument]
pub async fn delivery(Json(req): Json<DeliveryRequest>) -> Json<DeliveryResponse> {
    Json(DeliveryResponse {
        charge: delivery_charge(req.pincode),
    })
}

/// Create a gateway order for the submitted cart.
///
/// Recomputes the amount from current catalog prices; converts to paise only
/// in the gateway request.
#[instrument(skip(state, req), fields(lines = req.cart_items.len(), pincode = req.pincode))]
pub async fn create_payment_order(
    State(state): State<AppState>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<Json<CreateOrderResponse>> {
    let phone = Phone::parse(&req.phone)
        .map_err(|e| AppError::Validation(format!("invalid phone number: {e}")))?;

    if req.cart_items.is_empty() {
        return Err(AppError::Validation("cart is empty".to_string()));
    }

    // Price every line from the catalog, not from the client.
    let repo = ProductRepository::new(state.pool());
    let mut subtotal = Rupees::new(0);
    for line in &req.cart_items {
        if line.quantity == 0 {
            return Err(AppError::Validation("zero-quantity line".to_string()));
        }
        let product = repo
            .get_visible(ProductId::new(line.product_id))
            .await?
            .ok_or_else(|| {
                AppError::Validation(format!("product {} is unavailable", line.product_id))
            })?;
        subtotal += product.price.times(line.quantity);
    }

    let charge = delivery_charge(req.pincode);
    let total = subtotal + charge;

    let receipt = format!("rcpt_{}_{}", phone, Uuid::new_v4().simple());
    let order = state
        .razorpay()
        .create_order(total.to_paise(), &receipt)
        .await?;

    tracing::info!(order_id = %order.id, amount = order.amount, "gateway order created");

    Ok(Json(CreateOrderResponse {
        order_id: order.id,
        amount: Paise::new(order.amount),
        currency: "INR",
        key_id: state.razorpay().key_id().to_string(),
        subtotal,
        delivery_charge: charge,
    }))
}

/// Verify a client payment callback.
///
/// Recomputes the HMAC over `order_id|payment_id` with the API key secret.
/// This never creates an Order record - fulfillment is a separate,
/// authenticated call - so a forged callback cannot manufacture an order.
#[instrument(skip(state, req), fields(order_id = %req.order_id))]
pub async fn verify_payment(
    State(state): State<AppState>,
    Json(req): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>> {
    if req.order_id.is_empty() || req.payment_id.is_empty() || req.signature.is_empty() {
        return Err(AppError::Validation(
            "missing required payment details".to_string(),
        ));
    }

    let valid = payment_signature_valid(
        &req.order_id,
        &req.payment_id,
        &req.signature,
        &state.config().razorpay.key_secret,
    );

    if !valid {
        return Err(AppError::Verification);
    }

    tracing::info!(payment_id = %req.payment_id, "payment verified");

    Ok(Json(VerifyResponse {
        success: true,
        order_id: req.order_id,
        payment_id: req.payment_id,
    }))
}
