//! Membership rules
//!
//! Pure functions only, no I/O. Callers pass `now` explicitly so every rule
//! is deterministic under test.
//!
//! - [`status`] - derives Active / Inactive / Deactivated from the payment trail
//! - [`revenue`] - nested month / quarter / year fee totals
//! - [`window`] - calendar window boundaries shared by the two

pub mod revenue;
pub mod status;
pub mod window;

pub use revenue::{RevenueTotals, aggregate};
pub use status::{
    DEFAULT_VALIDITY_DAYS, GRACE_PERIOD_DAYS, MONTHLY_VALIDITY_DAYS, days_overdue, derive_status,
    latest_payment, summarize, valid_until,
};
pub use window::FeeWindows;
