//! Authentication
//!
//! A single fixed admin credential checked with HTTP Basic auth:
//! - [`AdminCredential`] - configured credential, compared by SHA-256 digest
//! - [`CurrentUser`] - authenticated caller, injected into request extensions
//! - [`require_auth`] - middleware guarding every non-public `/api/` route

pub mod credential;
pub mod middleware;

pub use credential::{AdminCredential, parse_basic_header};
pub use middleware::require_auth;

/// Authenticated caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub username: String,
}
