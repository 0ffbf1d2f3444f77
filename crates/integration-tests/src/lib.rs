//! Shared helpers for Patel Yarn House integration tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Sign a message the way the gateway does: lowercase hex HMAC-SHA256.
///
/// Tests use this to play the gateway's side of the signature handshake.
#[must_use]
pub fn gateway_sign(secret: &str, message: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .unwrap_or_else(|_| unreachable!());
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}
