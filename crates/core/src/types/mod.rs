//! Newtype wrappers shared across the workspace.

pub mod id;
pub mod money;
pub mod phone;

pub use id::{OrderId, ProductId, UserId};
pub use money::{Paise, Rupees};
pub use phone::{Phone, PhoneError};
