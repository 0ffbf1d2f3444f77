//! Authentication middleware and extractors.
//!
//! Provides extractors for requiring a logged-in customer (an
//! OTP-verified phone number) in route handlers.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentCustomer, session_keys};

/// Extractor that requires customer authentication.
///
/// If the customer is not logged in, returns 401 Unauthorized.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(customer): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", customer.phone)
/// }
/// ```
pub struct RequireAuth(pub CurrentCustomer);

/// Error returned when authentication is required but the customer is not
/// logged in.
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            axum::Json(serde_json::json!({
                "success": false,
                "error": "login required",
            })),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts.extensions.get::<Session>().ok_or(AuthRejection)?;

        // Get the current customer from the session
        let customer: CurrentCustomer = session
            .get(session_keys::CURRENT_CUSTOMER)
            .await
            .ok()
            .flatten()
            .ok_or(AuthRejection)?;

        Ok(Self(customer))
    }
}

/// Extractor that optionally gets the current customer.
///
/// Unlike `RequireAuth`, this does not reject the request if the customer is
/// not logged in.
pub struct OptionalAuth(pub Option<CurrentCustomer>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let customer = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentCustomer>(session_keys::CURRENT_CUSTOMER)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(customer))
    }
}

/// Helper to set the current customer in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_customer(
    session: &Session,
    customer: &CurrentCustomer,
) -> Result<(), tower_sessions::session::Error> {
    session
        .insert(session_keys::CURRENT_CUSTOMER, customer)
        .await
}

/// Helper to clear the current customer from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_customer(
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentCustomer>(session_keys::CURRENT_CUSTOMER)
        .await?;
    Ok(())
}
