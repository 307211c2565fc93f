//! Auth API: credential check and session verification

use axum::{
    Extension, Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::security_log;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub username: String,
}

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/verify", get(verify))
}

/// POST /api/auth/login - check a credential pair (public)
///
/// Stateless: no token is issued, clients keep sending Basic auth.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    if !state.credential.verify(&req.username, &req.password) {
        security_log!("WARN", "login_failed", username = req.username.clone());
        return Err(AppError::invalid_credentials());
    }

    security_log!("INFO", "login_success", username = req.username.clone());
    Ok(Json(LoginResponse {
        message: "Login successful".into(),
        username: state.credential.username().to_string(),
    }))
}

/// GET /api/auth/verify - requires Basic auth
pub async fn verify(Extension(user): Extension<CurrentUser>) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        valid: true,
        username: user.username,
    })
}
