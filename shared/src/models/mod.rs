//! Data models
//!
//! Shared between the server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are opaque `String`s (UUID v4 text), all instants are Unix millis.

pub mod member;
pub mod payment;
pub mod status_check;
pub mod summary;

// Re-exports
pub use member::*;
pub use payment::*;
pub use status_check::*;
pub use summary::*;
