//! External-service clients.

pub mod whatsapp;

pub use whatsapp::{WhatsAppClient, WhatsAppError};
