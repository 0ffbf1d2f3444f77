//! Razorpay wire types.

use serde::{Deserialize, Serialize};

/// A gateway order, as returned by the Orders API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayOrder {
    /// Gateway-issued order id (e.g. `order_Nf3qXqLkzp8aBC`).
    pub id: String,
    /// Amount in paise.
    pub amount: i64,
    /// ISO currency code (always `INR` here).
    pub currency: String,
    /// Caller-supplied receipt reference.
    pub receipt: Option<String>,
    /// Gateway order status (`created`, `attempted`, `paid`).
    pub status: String,
}

/// A webhook event, discriminated on the `event` field.
///
/// Only the three payment events this system consumes are representable;
/// any other event kind (or a payload that doesn't match the expected
/// shape) fails to decode, and the webhook endpoint rejects it. Decoding
/// failing closed is what replaces the original's optimistic indexing into
/// untyped JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event")]
pub enum WebhookEvent {
    /// Payment captured: the money is ours; mark the order paid.
    #[serde(rename = "payment.captured")]
    PaymentCaptured {
        payload: PaymentPayload,
    },
    /// Payment authorized but not yet captured. Logged only.
    #[serde(rename = "payment.authorized")]
    PaymentAuthorized {
        payload: PaymentPayload,
    },
    /// Payment failed. Logged only; the customer may retry checkout.
    #[serde(rename = "payment.failed")]
    PaymentFailed {
        payload: PaymentPayload,
    },
}

impl WebhookEvent {
    /// The payment entity carried by any of the known events.
    #[must_use]
    pub const fn payment(&self) -> &PaymentEntity {
        match self {
            Self::PaymentCaptured { payload }
            | Self::PaymentAuthorized { payload }
            | Self::PaymentFailed { payload } => &payload.payment.entity,
        }
    }
}

/// The `payload` object of a payment webhook.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentPayload {
    pub payment: PaymentEnvelope,
}

/// The `payment` wrapper inside a webhook payload.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentEnvelope {
    pub entity: PaymentEntity,
}

/// A payment entity as delivered in webhook payloads.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentEntity {
    /// Gateway payment id (e.g. `pay_Nf4rZqLkzp9xYZ`).
    pub id: String,
    /// The gateway order this payment belongs to.
    pub order_id: String,
    /// Amount in paise.
    pub amount: i64,
    /// Payment status (`captured`, `authorized`, `failed`).
    pub status: Option<String>,
    /// Failure reason, present on `payment.failed`.
    pub error_reason: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn captured_body() -> String {
        serde_json::json!({
            "entity": "event",
            "event": "payment.captured",
            "payload": {
                "payment": {
                    "entity": {
                        "id": "pay_Nf4rZqLkzp9xYZ",
                        "order_id": "order_Nf3qXqLkzp8aBC",
                        "amount": 60_000,
                        "status": "captured"
                    }
                }
            }
        })
        .to_string()
    }

    #[test]
    fn test_decode_payment_captured() {
        let event: WebhookEvent = serde_json::from_str(&captured_body()).unwrap();

        assert!(matches!(event, WebhookEvent::PaymentCaptured { .. }));
        assert_eq!(event.payment().order_id, "order_Nf3qXqLkzp8aBC");
        assert_eq!(event.payment().amount, 60_000);
    }

    #[test]
    fn test_decode_payment_failed_with_reason() {
        let body = serde_json::json!({
            "event": "payment.failed",
            "payload": {
                "payment": {
                    "entity": {
                        "id": "pay_x",
                        "order_id": "order_y",
                        "amount": 1000,
                        "error_reason": "payment_declined"
                    }
                }
            }
        })
        .to_string();

        let event: WebhookEvent = serde_json::from_str(&body).unwrap();
        assert!(matches!(event, WebhookEvent::PaymentFailed { .. }));
        assert_eq!(
            event.payment().error_reason.as_deref(),
            Some("payment_declined")
        );
    }

    #[test]
    fn test_unknown_event_kind_fails_closed() {
        let body = serde_json::json!({
            "event": "refund.processed",
            "payload": { "refund": { "entity": { "id": "rfnd_1" } } }
        })
        .to_string();

        assert!(serde_json::from_str::<WebhookEvent>(&body).is_err());
    }

    #[test]
    fn test_malformed_payload_fails_closed() {
        let body = serde_json::json!({
            "event": "payment.captured",
            "payload": { "unexpected": true }
        })
        .to_string();

        assert!(serde_json::from_str::<WebhookEvent>(&body).is_err());
    }

    #[test]
    fn test_gateway_order_decode() {
        let body = serde_json::json!({
            "id": "order_Nf3qXqLkzp8aBC",
            "amount": 60_000,
            "currency": "INR",
            "receipt": "rcpt_9876543210",
            "status": "created"
        })
        .to_string();

        let order: GatewayOrder = serde_json::from_str(&body).unwrap();
        assert_eq!(order.id, "order_Nf3qXqLkzp8aBC");
        assert_eq!(order.amount, 60_000);
        assert_eq!(order.status, "created");
    }
}
