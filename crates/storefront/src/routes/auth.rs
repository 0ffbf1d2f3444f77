//! OTP authentication route handlers.
//!
//! The login exchange is phone + one-time code for a session: successful
//! verification is treated as proof of identity for that phone number. A
//! deliberately low-assurance scheme, appropriate here because the phone
//! number is also the delivery contact; the credential check itself lives
//! behind [`crate::services::OtpStore`].

use axum::{Json, extract::State};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use patel_yarn_core::Phone;

use crate::error::{AppError, Result};
use crate::middleware::auth::{clear_current_customer, set_current_customer};
use crate::models::CurrentCustomer;
use crate::state::AppState;

/// OTP request body.
#[derive(Debug, Deserialize)]
pub struct OtpRequest {
    pub phone: String,
}

/// OTP request acknowledgement.
#[derive(Debug, Serialize)]
pub struct OtpResponse {
    pub success: bool,
    pub message: &'static str,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub phone: String,
    pub otp: String,
}

/// Login acknowledgement.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub phone: Phone,
}

/// Logout acknowledgement.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// Issue a login code and dispatch it over WhatsApp.
///
/// A new request overwrites any outstanding code for the phone.
#[instrument(skip(state, req))]
pub async fn request_otp(
    State(state): State<AppState>,
    Json(req): Json<OtpRequest>,
) -> Result<Json<OtpResponse>> {
    let phone = Phone::parse(&req.phone)
        .map_err(|e| AppError::Validation(format!("invalid phone number: {e}")))?;

    let code = state.otp_store().issue(&phone, Utc::now());

    state.whatsapp().send_otp(&phone, &code).await?;

    tracing::info!(phone = %phone, "OTP dispatched");

    Ok(Json(OtpResponse {
        success: true,
        message: "OTP sent",
    }))
}

/// Exchange a phone number and code for a session.
#[instrument(skip(state, session, req))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let phone = Phone::parse(&req.phone)
        .map_err(|e| AppError::Validation(format!("invalid phone number: {e}")))?;

    if !state.otp_store().verify(&phone, &req.otp, Utc::now()) {
        return Err(AppError::Unauthorized("invalid credentials".to_string()));
    }

    let customer = CurrentCustomer {
        phone: phone.clone(),
    };
    set_current_customer(&session, &customer).await?;

    tracing::info!(phone = %phone, "customer logged in");

    Ok(Json(LoginResponse {
        success: true,
        phone,
    }))
}

/// Clear the session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<LogoutResponse>> {
    clear_current_customer(&session).await?;
    Ok(Json(LogoutResponse { success: true }))
}
