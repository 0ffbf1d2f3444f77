//! Integration tests for webhook event decoding.
//!
//! The decoder must accept exactly the three payment events the system
//! consumes and reject everything else - unknown kinds and malformed
//! payloads alike.

use patel_yarn_storefront::razorpay::WebhookEvent;

fn payment_event(kind: &str) -> String {
    serde_json::json!({
        "entity": "event",
        "account_id": "acc_BFQ7uQEaa7j2z7",
        "event": kind,
        "contains": ["payment"],
        "payload": {
            "payment": {
                "entity": {
                    "id": "pay_Nf4rZqLkzp9xYZ",
                    "entity": "payment",
                    "order_id": "order_Nf3qXqLkzp8aBC",
                    "amount": 60_000,
                    "currency": "INR",
                    "status": "captured",
                    "method": "upi"
                }
            }
        },
        "created_at": 1_754_500_000
    })
    .to_string()
}

#[test]
fn test_all_consumed_events_decode() {
    for kind in ["payment.captured", "payment.authorized", "payment.failed"] {
        let decoded: Result<WebhookEvent, _> = serde_json::from_str(&payment_event(kind));
        assert!(decoded.is_ok(), "{kind} should decode");
    }
}

#[test]
fn test_decoded_event_exposes_payment_entity() {
    let event: WebhookEvent =
        serde_json::from_str(&payment_event("payment.captured")).expect("decodes");

    let payment = event.payment();
    assert_eq!(payment.id, "pay_Nf4rZqLkzp9xYZ");
    assert_eq!(payment.order_id, "order_Nf3qXqLkzp8aBC");
    assert_eq!(payment.amount, 60_000);
}

#[test]
fn test_unconsumed_event_kinds_fail_closed() {
    for kind in [
        "order.paid",
        "refund.created",
        "payment.dispute.created",
        "invoice.paid",
    ] {
        let decoded: Result<WebhookEvent, _> = serde_json::from_str(&payment_event(kind));
        assert!(decoded.is_err(), "{kind} should be rejected");
    }
}

#[test]
fn test_missing_event_tag_fails_closed() {
    let body = serde_json::json!({
        "payload": { "payment": { "entity": { "id": "pay_x", "order_id": "o", "amount": 1 } } }
    })
    .to_string();

    assert!(serde_json::from_str::<WebhookEvent>(&body).is_err());
}

#[test]
fn test_payload_without_payment_entity_fails_closed() {
    let body = serde_json::json!({
        "event": "payment.captured",
        "payload": { "order": { "entity": { "id": "order_only" } } }
    })
    .to_string();

    assert!(serde_json::from_str::<WebhookEvent>(&body).is_err());
}

#[test]
fn test_non_json_fails_closed() {
    assert!(serde_json::from_str::<WebhookEvent>("not json at all").is_err());
    assert!(serde_json::from_str::<WebhookEvent>("42").is_err());
    assert!(serde_json::from_str::<WebhookEvent>("\"payment.captured\"").is_err());
}
