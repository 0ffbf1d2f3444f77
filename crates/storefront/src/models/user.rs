//! User domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use patel_yarn_core::{Phone, UserId};

/// A storefront customer.
///
/// Created or updated via the checkout delivery form; the phone number is
/// the unique external identifier (and the login credential, via OTP).
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Full name.
    pub name: String,
    /// Delivery address.
    pub address: String,
    /// Delivery pincode.
    pub pincode: i32,
    /// Phone number (unique).
    pub phone: Phone,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}
