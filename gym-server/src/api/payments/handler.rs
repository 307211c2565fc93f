//! Payment API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{Payment, PaymentCreate, PaymentQuery};
use shared::util::now_millis;

use crate::core::ServerState;
use crate::services::fees;
use crate::utils::AppResult;

/// GET /api/payments?member_id=xxx - newest payment date first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PaymentQuery>,
) -> AppResult<Json<Vec<Payment>>> {
    let payments = fees::list_payments(state.pool(), query.member_id.as_deref()).await?;
    Ok(Json(payments))
}

/// GET /api/payments/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Payment>> {
    let payment = fees::get_payment(state.pool(), &id).await?;
    Ok(Json(payment))
}

/// POST /api/payments - collect a fee
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PaymentCreate>,
) -> AppResult<Json<Payment>> {
    let payment = fees::collect_fee(state.pool(), payload, now_millis()).await?;
    Ok(Json(payment))
}
