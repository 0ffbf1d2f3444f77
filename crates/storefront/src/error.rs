//! Unified error handling.
//!
//! Provides a unified `AppError` type covering the storefront's failure
//! taxonomy. All route handlers return `Result<T, AppError>`; every error is
//! converted into a JSON body plus a logged detail at the boundary, and no
//! error crashes a request handler.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::razorpay::RazorpayError;
use crate::services::WhatsAppError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad input the customer can fix (missing fields, malformed phone,
    /// empty cart).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The payment gateway rejected the request or is unreachable.
    /// Retryable by re-attempting checkout.
    #[error("Gateway error: {0}")]
    Gateway(#[from] RazorpayError),

    /// A payment signature did not verify. Treated as a security event.
    #[error("Payment verification failed")]
    Verification,

    /// A database write failed after payment was already confirmed. The one
    /// case that must surface "contact support" instead of a generic retry:
    /// retrying could double-charge or lose the payment reference.
    #[error("Persistence error after payment: {0}")]
    Persistence(RepositoryError),

    /// The messaging API call failed. Retryable (re-request the code).
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] WhatsAppError),

    /// Database operation failed outside the post-payment window.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Session read/write failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server-side failures with full detail; the client gets a
        // sanitized message below.
        match &self {
            Self::Database(_) | Self::Session(_) | Self::Internal(_) | Self::Persistence(_) => {
                tracing::error!(error = %self, "Request error");
            }
            Self::Gateway(_) | Self::Dispatch(_) => {
                tracing::warn!(error = %self, "Upstream error");
            }
            Self::Verification => {
                tracing::warn!("Payment signature verification failed");
            }
            _ => {}
        }

        let status = match &self {
            Self::Validation(_) | Self::Verification => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Gateway(_) | Self::Dispatch(_) => StatusCode::BAD_GATEWAY,
            Self::Persistence(_) | Self::Database(_) | Self::Session(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Validation(msg) => msg.clone(),
            Self::Gateway(_) => "failed to create order, try again".to_string(),
            Self::Verification => "payment verification failed".to_string(),
            Self::Persistence(_) => {
                "payment succeeded but order processing failed, contact support".to_string()
            }
            Self::Dispatch(_) => "failed to send OTP".to_string(),
            Self::NotFound(what) => format!("{what} not found"),
            Self::Unauthorized(msg) => msg.clone(),
            Self::Database(_) | Self::Session(_) | Self::Internal(_) => {
                "internal server error".to_string()
            }
        };

        let body = Json(serde_json::json!({
            "success": false,
            "error": message,
        }));

        (status, body).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product".to_string());
        assert_eq!(err.to_string(), "Not found: product");

        let err = AppError::Validation("cart is empty".to_string());
        assert_eq!(err.to_string(), "Validation error: cart is empty");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::Validation("x".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(get_status(AppError::Verification), StatusCode::BAD_REQUEST);
        assert_eq!(
            get_status(AppError::Unauthorized("x".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::NotFound("x".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Persistence(crate::db::RepositoryError::NotFound)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Internal("x".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
