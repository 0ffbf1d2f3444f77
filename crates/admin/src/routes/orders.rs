//! Order management route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::instrument;

use patel_yarn_core::OrderId;

use crate::db::OrderAdminRepository;
use crate::db::orders::{AdminOrder, AdminOrderDetail};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Shipped-flag form.
#[derive(Debug, Deserialize)]
pub struct CompleteForm {
    pub complete: bool,
}

/// Payment-flag form.
#[derive(Debug, Deserialize)]
pub struct PaidForm {
    pub paid: bool,
}

/// All orders with their customers, newest first.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<AdminOrder>>> {
    let orders = OrderAdminRepository::new(state.pool()).list().await?;
    Ok(Json(orders))
}

/// One order with its customer and lines.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AdminOrderDetail>> {
    let order = OrderAdminRepository::new(state.pool())
        .get(&OrderId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("order".to_string()))?;

    Ok(Json(order))
}

/// Set the shipped flag.
///
/// Marking an order complete notifies the customer over WhatsApp with the
/// tracking template. The status change is the source of truth: a failed
/// notification is logged and the request still succeeds.
#[instrument(skip(state, form))]
pub async fn set_complete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<CompleteForm>,
) -> Result<Json<AdminOrder>> {
    let order_id = OrderId::new(id);

    let order = OrderAdminRepository::new(state.pool())
        .set_complete(&order_id, form.complete)
        .await?;

    tracing::info!(order_id = %order.id, complete = form.complete, "order status changed");

    if form.complete {
        match order.phone() {
            Ok(phone) => {
                if let Err(e) = state.whatsapp().send_tracking(&phone, order.id.as_str()).await {
                    tracing::warn!(order_id = %order.id, error = %e, "tracking notification failed");
                }
            }
            Err(e) => {
                tracing::warn!(order_id = %order.id, error = %e, "cannot notify customer");
            }
        }
    }

    Ok(Json(order))
}

/// Manual override of the payment flag.
///
/// The webhook normally sets `paid`; this exists for payments confirmed out
/// of band. Idempotent either way.
#[instrument(skip(state, form))]
pub async fn set_paid(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<PaidForm>,
) -> Result<Json<AdminOrderDetail>> {
    let order_id = OrderId::new(id);

    let repo = OrderAdminRepository::new(state.pool());
    repo.set_paid(&order_id, form.paid).await?;

    let order = repo
        .get(&order_id)
        .await?
        .ok_or_else(|| AppError::NotFound("order".to_string()))?;

    tracing::info!(order_id = %order_id, paid = form.paid, "payment flag changed");

    Ok(Json(order))
}
