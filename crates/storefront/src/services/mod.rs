//! External-service clients and in-process services.

pub mod otp;
pub mod whatsapp;

pub use otp::OtpStore;
pub use whatsapp::{WhatsAppClient, WhatsAppError};
