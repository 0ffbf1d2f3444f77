//! Razorpay gateway integration.
//!
//! Three concerns, kept separate:
//! - [`client`] - REST client for creating gateway orders (server-side only,
//!   so the charged amount can never be supplied by a browser)
//! - [`signature`] - HMAC verification of payment callbacks and webhooks
//! - [`types`] - wire types, including the webhook event union that fails
//!   closed on unknown event kinds

pub mod client;
pub mod signature;
pub mod types;

pub use client::{RazorpayClient, RazorpayError};
pub use types::{GatewayOrder, PaymentEntity, WebhookEvent};
