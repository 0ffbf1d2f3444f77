//! WhatsApp Cloud API client for order notifications.
//!
//! Sends the shipped-order notice through the pre-approved `tracking`
//! message template. Numbers are dialed with the `91` country prefix.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use thiserror::Error;

use patel_yarn_core::Phone;

use crate::config::WhatsAppConfig;

/// Graph API base URL.
const BASE_URL: &str = "https://graph.facebook.com/v22.0";

/// Errors that can occur when dispatching a message.
#[derive(Debug, Error)]
pub enum WhatsAppError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to build the client.
    #[error("Client error: {0}")]
    Client(String),
}

/// WhatsApp Cloud API client.
#[derive(Clone)]
pub struct WhatsAppClient {
    client: reqwest::Client,
    phone_id: String,
}

impl WhatsAppClient {
    /// Create a new WhatsApp Cloud API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &WhatsAppConfig) -> Result<Self, WhatsAppError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.access_token.expose_secret());
        let mut auth_header = HeaderValue::from_str(&auth_value)
            .map_err(|e| WhatsAppError::Client(format!("Invalid access token format: {e}")))?;
        auth_header.set_sensitive(true);
        headers.insert("Authorization", auth_header);

        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            phone_id: config.phone_id.clone(),
        })
    }

    /// Tell a customer their order has shipped, via the `tracking` template.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails or is rejected.
    pub async fn send_tracking(&self, to: &Phone, order_id: &str) -> Result<(), WhatsAppError> {
        let url = format!("{BASE_URL}/{}/messages", self.phone_id);

        let body = serde_json::json!({
            "messaging_product": "whatsapp",
            "to": format!("91{to}"),
            "type": "template",
            "template": {
                "name": "tracking",
                "language": { "code": "en" },
                "components": [
                    {
                        "type": "body",
                        "parameters": [{ "type": "text", "text": order_id }],
                    },
                ],
            },
        });

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(WhatsAppError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}
