//! Session-related types.
//!
//! Types stored in the session for authentication and cart state.

use serde::{Deserialize, Serialize};

use patel_yarn_core::Phone;

/// Session-stored customer identity.
///
/// Minimal data stored in the session to identify the logged-in customer.
/// OTP verification is the only way this gets written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentCustomer {
    /// The verified phone number.
    pub phone: Phone,
}

/// Session keys for storefront data.
pub mod session_keys {
    /// Key for storing the current logged-in customer.
    pub const CURRENT_CUSTOMER: &str = "current_customer";

    /// Key for the persisted cart.
    pub const CART: &str = "cart";
}
