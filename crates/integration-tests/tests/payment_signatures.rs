//! Integration tests for the payment signature handshake.
//!
//! These tests play the gateway's side: they produce the signatures Razorpay
//! would attach to the client success callback and to webhook deliveries,
//! and check the storefront's verification against them.

use secrecy::SecretString;

use patel_yarn_integration_tests::gateway_sign;
use patel_yarn_storefront::razorpay::signature::{
    payment_signature_valid, webhook_signature_valid,
};

const KEY_SECRET: &str = "rzpT3stK3yS3cr3t9912";
const WEBHOOK_SECRET: &str = "rzpT3stWbhkS3cr3t4471";

fn key_secret() -> SecretString {
    SecretString::from(KEY_SECRET)
}

fn webhook_secret() -> SecretString {
    SecretString::from(WEBHOOK_SECRET)
}

// =============================================================================
// Client callback signature
// =============================================================================

#[test]
fn test_genuine_callback_signature_verifies() {
    let signature = gateway_sign(KEY_SECRET, b"order_Nf3qXqLkzp8aBC|pay_Nf4rZqLkzp9xYZ");

    assert!(payment_signature_valid(
        "order_Nf3qXqLkzp8aBC",
        "pay_Nf4rZqLkzp9xYZ",
        &signature,
        &key_secret(),
    ));
}

#[test]
fn test_forged_callback_is_rejected() {
    // Correct order and payment ids, wrong signature: the forged-callback
    // case the verification step exists to stop.
    assert!(!payment_signature_valid(
        "order_Nf3qXqLkzp8aBC",
        "pay_Nf4rZqLkzp9xYZ",
        "0f9a8b7c6d5e4f3a2b1c0d9e8f7a6b5c4d3e2f1a0b9c8d7e6f5a4b3c2d1e0f9a",
        &key_secret(),
    ));
}

#[test]
fn test_signature_for_other_payment_does_not_transfer() {
    // A signature captured from one payment must not verify another.
    let signature = gateway_sign(KEY_SECRET, b"order_first|pay_first");

    assert!(!payment_signature_valid(
        "order_second",
        "pay_second",
        &signature,
        &key_secret(),
    ));
}

// =============================================================================
// Webhook signature
// =============================================================================

#[test]
fn test_genuine_webhook_signature_verifies() {
    let body = br#"{"event":"payment.captured","payload":{}}"#;
    let signature = gateway_sign(WEBHOOK_SECRET, body);

    assert!(webhook_signature_valid(body, &signature, &webhook_secret()));
}

#[test]
fn test_webhook_body_tampering_is_detected() {
    let body = br#"{"event":"payment.captured","payload":{"amount":60000}}"#;
    let signature = gateway_sign(WEBHOOK_SECRET, body);

    let tampered = br#"{"event":"payment.captured","payload":{"amount":1}}"#;
    assert!(!webhook_signature_valid(tampered, &signature, &webhook_secret()));
}

#[test]
fn test_api_secret_cannot_sign_webhooks() {
    // The two paths use distinct secrets; a webhook signed with the API key
    // secret must fail the webhook check.
    let body = br#"{"event":"payment.captured"}"#;
    let signature = gateway_sign(KEY_SECRET, body);

    assert!(!webhook_signature_valid(body, &signature, &webhook_secret()));
}
