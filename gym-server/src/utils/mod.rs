//! Utilities - shared error types, logging, validation and money helpers

pub mod logger;
pub mod money;
pub mod validation;

// Unified error types live in `shared::error`
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
