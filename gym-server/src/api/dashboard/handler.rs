use axum::{Json, extract::State};
use shared::models::{DashboardStats, FeeSummary};
use shared::util::now_millis;

use crate::core::ServerState;
use crate::services::fees;
use crate::utils::AppResult;

/// GET /api/fee-summary
pub async fn fee_summary(State(state): State<ServerState>) -> AppResult<Json<FeeSummary>> {
    let summary = fees::fee_summary(state.pool(), now_millis()).await?;
    Ok(Json(summary))
}

/// GET /api/dashboard/stats - refreshes every member's status
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<DashboardStats>> {
    let stats = fees::dashboard_stats(state.pool(), now_millis()).await?;
    Ok(Json(stats))
}
