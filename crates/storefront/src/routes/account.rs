//! Account route handlers.
//!
//! The delivery form creates or updates the user record keyed by the
//! session's verified phone number.

use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::instrument;

use crate::db::UserRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::User;
use crate::state::AppState;

/// Delivery details form.
#[derive(Debug, Deserialize)]
pub struct AccountForm {
    pub name: String,
    pub address: String,
    pub pincode: i32,
}

/// The delivery details for the session phone, if any have been saved.
#[instrument(skip(state, auth))]
pub async fn show(
    State(state): State<AppState>,
    auth: RequireAuth,
) -> Result<Json<Option<User>>> {
    let RequireAuth(customer) = auth;

    let user = UserRepository::new(state.pool())
        .get_by_phone(&customer.phone)
        .await?;

    Ok(Json(user))
}

/// Create or update the delivery details for the session phone.
#[instrument(skip(state, auth, form))]
pub async fn upsert(
    State(state): State<AppState>,
    auth: RequireAuth,
    Json(form): Json<AccountForm>,
) -> Result<Json<User>> {
    let RequireAuth(customer) = auth;

    let name = form.name.trim();
    let address = form.address.trim();
    if name.is_empty() || address.is_empty() {
        return Err(AppError::Validation("all fields are required".to_string()));
    }
    if !(100_000..=999_999).contains(&form.pincode) {
        return Err(AppError::Validation("invalid pincode".to_string()));
    }

    let user = UserRepository::new(state.pool())
        .upsert(&customer.phone, name, address, form.pincode)
        .await?;

    tracing::info!(user_id = %user.id, "delivery details saved");

    Ok(Json(user))
}
