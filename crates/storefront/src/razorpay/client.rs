//! Razorpay Orders API client.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use thiserror::Error;

use patel_yarn_core::Paise;

use crate::config::RazorpayConfig;

use super::types::GatewayOrder;

/// Razorpay API base URL.
const BASE_URL: &str = "https://api.razorpay.com/v1";

/// Errors that can occur when interacting with the Razorpay API.
#[derive(Debug, Error)]
pub enum RazorpayError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Body of an order-creation request.
#[derive(Debug, Serialize)]
struct CreateOrderBody<'a> {
    /// Amount in paise.
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
}

/// Razorpay Orders API client.
#[derive(Clone)]
pub struct RazorpayClient {
    client: reqwest::Client,
    key_id: String,
    key_secret: SecretString,
}

impl RazorpayClient {
    /// Create a new Razorpay API client.
    #[must_use]
    pub fn new(config: &RazorpayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            key_id: config.key_id.clone(),
            key_secret: config.key_secret.clone(),
        }
    }

    /// The API key id, for binding the hosted payment UI to an order.
    #[must_use]
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Create a gateway order for `amount`.
    ///
    /// The amount is denominated in paise, INR only. The gateway responds
    /// with the order id that keys the rest of the payment flow.
    ///
    /// # Errors
    ///
    /// Returns `RazorpayError::Api` if the gateway rejects the request, or
    /// `RazorpayError::Http` if it is unreachable.
    pub async fn create_order(
        &self,
        amount: Paise,
        receipt: &str,
    ) -> Result<GatewayOrder, RazorpayError> {
        let url = format!("{BASE_URL}/orders");
        let body = CreateOrderBody {
            amount: amount.as_i64(),
            currency: "INR",
            receipt,
        };

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.key_id, Some(self.key_secret.expose_secret()))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RazorpayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<GatewayOrder>()
            .await
            .map_err(|e| RazorpayError::Parse(e.to_string()))
    }
}
