//! Shared types for the gym administration backend
//!
//! Models exchanged over the HTTP API and stored by the persistence gateway,
//! plus the unified error system used by every handler.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
