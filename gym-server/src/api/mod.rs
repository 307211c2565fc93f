//! HTTP API
//!
//! Each module exposes `router()`; [`build_app`] merges them and applies the
//! middleware stack.

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod members;
pub mod payments;
pub mod status;

use std::time::Instant;

use axum::{Router, middleware};
use http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::{Config, ServerState};

/// HTTP access log middleware
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let latency_ms = started.elapsed().as_millis() as u64;
    if status.is_server_error() {
        tracing::warn!(target: "http_access", latency_ms, "{} {} {}", method, uri, status);
    } else {
        tracing::info!(target: "http_access", latency_ms, "{} {} {}", method, uri, status);
    }

    response
}

/// Build the router with every route registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::<ServerState>::new()
        // Public
        .merge(health::router())
        .merge(status::router())
        .merge(auth::router())
        // Basic auth required
        .merge(members::router())
        .merge(payments::router())
        .merge(dashboard::router())
}

/// Build the fully configured application
///
/// Used by the HTTP server and by integration tests via `oneshot`.
pub fn build_app(state: ServerState) -> Router {
    let cors = cors_layer(&state.config);

    build_router()
        // require_auth skips public routes internally
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(log_request))
}

fn cors_layer(config: &Config) -> CorsLayer {
    match config.cors_allow_list() {
        None => {
            if config.is_production() {
                tracing::warn!("CORS allows any origin in production, set CORS_ORIGINS");
            }
            CorsLayer::permissive()
        }
        Some(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|o| match HeaderValue::from_str(o) {
                    Ok(v) => Some(v),
                    Err(_) => {
                        tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers(Any)
        }
    }
}
