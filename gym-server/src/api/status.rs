//! API root and status-check pings (public)

use axum::{
    Json, Router,
    extract::State,
    routing::get,
};
use shared::models::{StatusCheck, StatusCheckCreate};

use crate::core::ServerState;
use crate::db::repository::status_check;
use crate::utils::AppResult;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};

/// Pings returned by `GET /api/status`
const STATUS_CHECK_LIST_LIMIT: i64 = 1000;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/", get(root))
        .route("/api/status", get(list).post(create))
}

/// GET /api/
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Fitness Admin API" }))
}

/// POST /api/status - record a ping
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<StatusCheckCreate>,
) -> AppResult<Json<StatusCheck>> {
    validate_required_text(&payload.client_name, "client_name", MAX_NAME_LEN)?;
    let check = status_check::create(
        state.pool(),
        payload.client_name.trim(),
        shared::util::now_millis(),
    )
    .await?;
    Ok(Json(check))
}

/// GET /api/status - recent pings
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<StatusCheck>>> {
    let checks = status_check::find_recent(state.pool(), STATUS_CHECK_LIST_LIMIT).await?;
    Ok(Json(checks))
}
