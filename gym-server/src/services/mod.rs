//! Services - orchestration around the membership rules
//!
//! - [`membership`] - member CRUD with status write-back
//! - [`fees`] - fee collection, revenue summary, dashboard counters

pub mod fees;
pub mod membership;
