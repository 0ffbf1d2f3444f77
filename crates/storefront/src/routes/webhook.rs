//! Gateway webhook route handler.
//!
//! The webhook path is independent of the client verification path: it may
//! fire before, after, or never relative to fulfillment, and the gateway
//! retries deliveries it considers failed. Marking the order paid is an
//! idempotent single-field set, so repetition and interleaving are safe.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use serde::Serialize;
use tracing::instrument;

use patel_yarn_core::OrderId;

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::razorpay::WebhookEvent;
use crate::razorpay::signature::webhook_signature_valid;
use crate::state::AppState;

/// Signature header set by the gateway.
const SIGNATURE_HEADER: &str = "x-razorpay-signature";

/// Webhook acknowledgement body.
#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub success: bool,
}

/// Receive a gateway webhook.
///
/// The signature is verified over the raw body with the webhook-specific
/// secret before any parsing. Decoding fails closed: an event kind this
/// system does not consume is a 400, not a silent success.
///
/// A `payment.captured` for an order id with no recorded Order yet returns
/// 404 so the gateway's retry machinery redelivers after fulfillment lands.
#[instrument(skip_all)]
pub async fn receive(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<WebhookAck>)> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Validation("missing webhook signature".to_string()))?;

    if !webhook_signature_valid(&body, signature, &state.config().razorpay.webhook_secret) {
        return Err(AppError::Verification);
    }

    let event: WebhookEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::Validation(format!("unrecognized webhook event: {e}")))?;

    match &event {
        WebhookEvent::PaymentCaptured { .. } => {
            let payment = event.payment();
            let order_id = OrderId::new(payment.order_id.clone());

            let known = OrderRepository::new(state.pool()).mark_paid(&order_id).await?;
            if !known {
                tracing::info!(order_id = %order_id, "captured webhook before fulfillment, asking for redelivery");
                return Err(AppError::NotFound("order".to_string()));
            }

            tracing::info!(order_id = %order_id, payment_id = %payment.id, "order marked paid");
        }
        WebhookEvent::PaymentAuthorized { .. } => {
            tracing::info!(payment_id = %event.payment().id, "payment authorized");
        }
        WebhookEvent::PaymentFailed { .. } => {
            let payment = event.payment();
            tracing::warn!(
                payment_id = %payment.id,
                reason = payment.error_reason.as_deref().unwrap_or("unknown"),
                "payment failed"
            );
        }
    }

    Ok((StatusCode::OK, Json(WebhookAck { success: true })))
}
