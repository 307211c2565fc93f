//! Authentication middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http::HeaderValue;

use crate::AppError;
use crate::auth::{CurrentUser, parse_basic_header};
use crate::core::ServerState;
use crate::security_log;

/// Routes under `/api/` reachable without credentials
const PUBLIC_API_ROUTES: &[&str] = &["/api/", "/api/status", "/api/auth/login"];

/// Authentication middleware - requires the admin credential
///
/// Validates `Authorization: Basic <base64(user:pass)>` and on success injects
/// [`CurrentUser`] into the request extensions.
///
/// # Skipped
///
/// - `OPTIONS *` (CORS preflight)
/// - non-`/api/` paths (health check, unknown routes fall through to 404)
/// - [`PUBLIC_API_ROUTES`]
///
/// # Errors
///
/// | Case | Status |
/// |------|--------|
/// | No Authorization header | 401 NotAuthenticated |
/// | Malformed header or wrong credential | 401 InvalidCredentials |
///
/// 401 responses carry a `WWW-Authenticate: Basic` challenge.
pub async fn require_auth(State(state): State<ServerState>, mut req: Request, next: Next) -> Response {
    let path = req.uri().path();

    if req.method() == http::Method::OPTIONS {
        return next.run(req).await;
    }

    if !path.starts_with("/api/") || PUBLIC_API_ROUTES.contains(&path) {
        return next.run(req).await;
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let (username, password) = match auth_header {
        Some(header) => match parse_basic_header(header) {
            Some(pair) => pair,
            None => {
                security_log!("WARN", "auth_malformed", uri = format!("{:?}", req.uri()));
                return challenge(AppError::invalid_credentials());
            }
        },
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return challenge(AppError::unauthorized());
        }
    };

    if !state.credential.verify(&username, &password) {
        security_log!(
            "WARN",
            "auth_failed",
            username = username.clone(),
            uri = format!("{:?}", req.uri())
        );
        return challenge(AppError::invalid_credentials());
    }

    req.extensions_mut().insert(CurrentUser { username });
    next.run(req).await
}

fn challenge(err: AppError) -> Response {
    let mut response = err.into_response();
    response.headers_mut().insert(
        http::header::WWW_AUTHENTICATE,
        HeaderValue::from_static("Basic realm=\"gym-admin\""),
    );
    response
}
