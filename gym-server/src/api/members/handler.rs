//! Member API Handlers
//!
//! Reads and updates write the recomputed status back (see
//! [`crate::services::membership`]).

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Member, MemberCreate, MemberDeleted, MemberStatusSummary, MemberUpdate};
use shared::util::now_millis;

use crate::core::ServerState;
use crate::services::membership;
use crate::utils::AppResult;

/// GET /api/members - all members, statuses refreshed
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Member>>> {
    let members = membership::refresh_all(state.pool(), now_millis()).await?;
    Ok(Json(members))
}

/// GET /api/members/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Member>> {
    let member = membership::get_member(state.pool(), &id, now_millis()).await?;
    Ok(Json(member))
}

/// POST /api/members
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MemberCreate>,
) -> AppResult<Json<Member>> {
    let member = membership::create_member(state.pool(), payload, now_millis()).await?;
    Ok(Json(member))
}

/// PUT /api/members/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MemberUpdate>,
) -> AppResult<Json<Member>> {
    let member = membership::update_member(state.pool(), &id, payload, now_millis()).await?;
    Ok(Json(member))
}

/// DELETE /api/members/{id} - removes the member and its payments
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MemberDeleted>> {
    let deleted_payments = membership::delete_member(state.pool(), &id).await?;
    Ok(Json(MemberDeleted {
        message: "Member deleted successfully".into(),
        deleted_payments,
    }))
}

/// GET /api/members/{id}/status
pub async fn status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MemberStatusSummary>> {
    let summary = membership::status_summary(state.pool(), &id, now_millis()).await?;
    Ok(Json(summary))
}
