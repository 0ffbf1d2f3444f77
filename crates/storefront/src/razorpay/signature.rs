//! Gateway signature verification.
//!
//! Two distinct HMAC-SHA256 checks, with two distinct secrets:
//!
//! - The client-side success callback signs `"{order_id}|{payment_id}"` with
//!   the API key secret. The callback reaches us through the customer's
//!   browser, so this check is mandatory even though the gateway already
//!   trusts that client - it is what stops a forged callback.
//! - Webhooks sign the raw request body with the webhook-specific secret.
//!   The body must be verified exactly as received, before any JSON parsing.
//!
//! Comparison is constant-time in both cases.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Compute the lowercase hex HMAC-SHA256 of `message` under `secret`.
fn hmac_hex(secret: &[u8], message: &[u8]) -> String {
    // HMAC accepts keys of any length, so new_from_slice cannot fail
    let mut mac = HmacSha256::new_from_slice(secret).unwrap_or_else(|_| unreachable!());
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}

/// Verify a client payment-callback signature.
///
/// Recomputes the HMAC over `"{order_id}|{payment_id}"` with the API key
/// secret and compares it to the supplied hex signature in constant time.
#[must_use]
pub fn payment_signature_valid(
    order_id: &str,
    payment_id: &str,
    signature: &str,
    key_secret: &SecretString,
) -> bool {
    let message = format!("{order_id}|{payment_id}");
    let expected = hmac_hex(key_secret.expose_secret().as_bytes(), message.as_bytes());

    expected.as_bytes().ct_eq(signature.as_bytes()).into()
}

/// Verify a webhook signature over the raw request body.
///
/// Uses the webhook-specific secret, not the API key secret.
#[must_use]
pub fn webhook_signature_valid(body: &[u8], signature: &str, webhook_secret: &SecretString) -> bool {
    let expected = hmac_hex(webhook_secret.expose_secret().as_bytes(), body);

    expected.as_bytes().ct_eq(signature.as_bytes()).into()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn secret() -> SecretString {
        SecretString::from("kTeS3cr3tF0rT3st1ng")
    }

    fn sign(message: &str) -> String {
        hmac_hex(secret().expose_secret().as_bytes(), message.as_bytes())
    }

    #[test]
    fn test_payment_signature_accepts_valid() {
        let sig = sign("order_abc|pay_xyz");
        assert!(payment_signature_valid("order_abc", "pay_xyz", &sig, &secret()));
    }

    #[test]
    fn test_payment_signature_rejects_tampered_ids() {
        let sig = sign("order_abc|pay_xyz");
        assert!(!payment_signature_valid("order_abc", "pay_other", &sig, &secret()));
        assert!(!payment_signature_valid("order_other", "pay_xyz", &sig, &secret()));
    }

    #[test]
    fn test_payment_signature_rejects_garbage() {
        assert!(!payment_signature_valid(
            "order_abc",
            "pay_xyz",
            "deadbeef",
            &secret()
        ));
        assert!(!payment_signature_valid("order_abc", "pay_xyz", "", &secret()));
    }

    #[test]
    fn test_payment_signature_rejects_wrong_secret() {
        let sig = sign("order_abc|pay_xyz");
        let other = SecretString::from("aD1ff3r3ntS3cr3t");
        assert!(!payment_signature_valid("order_abc", "pay_xyz", &sig, &other));
    }

    #[test]
    fn test_webhook_signature_accepts_valid_body() {
        let body = br#"{"event":"payment.captured"}"#;
        let sig = hmac_hex(secret().expose_secret().as_bytes(), body);
        assert!(webhook_signature_valid(body, &sig, &secret()));
    }

    #[test]
    fn test_webhook_signature_rejects_modified_body() {
        let body = br#"{"event":"payment.captured"}"#;
        let sig = hmac_hex(secret().expose_secret().as_bytes(), body);

        let tampered = br#"{"event":"payment.captured" }"#;
        assert!(!webhook_signature_valid(tampered, &sig, &secret()));
    }

    #[test]
    fn test_webhook_and_payment_secrets_are_not_interchangeable() {
        // The same message signed with the API secret must not pass the
        // webhook check under a different webhook secret.
        let body = b"order_abc|pay_xyz";
        let sig = hmac_hex(secret().expose_secret().as_bytes(), body);
        let webhook_secret = SecretString::from("wH0l3Oth3rS3cr3t");
        assert!(!webhook_signature_valid(body, &sig, &webhook_secret));
    }
}
