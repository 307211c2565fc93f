//! Revenue summary and dashboard counters

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/fee-summary", get(handler::fee_summary))
        .route("/api/dashboard/stats", get(handler::stats))
}
