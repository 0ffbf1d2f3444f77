//! Storefront middleware.

pub mod auth;
pub mod session;

pub use auth::{OptionalAuth, RequireAuth};
pub use session::create_session_layer;
