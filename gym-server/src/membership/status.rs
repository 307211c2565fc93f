//! Status Engine
//!
//! Membership status is never the source of truth: it is recomputed from the
//! latest payment's `valid_until` on every read.

use shared::models::{MemberStatusSummary, MembershipStatus, Payment, PaymentType};
use shared::util::DAY_MILLIS;

/// Days a monthly payment keeps a member active
pub const MONTHLY_VALIDITY_DAYS: i64 = 30;

/// Days any other payment type keeps a member active (quarterly included)
pub const DEFAULT_VALIDITY_DAYS: i64 = 365;

/// Days after `valid_until` before an Inactive member becomes Deactivated
pub const GRACE_PERIOD_DAYS: i64 = 90;

/// Instant through which a payment of `payment_type` made at `payment_date` stays valid
pub fn valid_until(payment_type: PaymentType, payment_date: i64) -> i64 {
    let days = match payment_type {
        PaymentType::Monthly => MONTHLY_VALIDITY_DAYS,
        PaymentType::Quarterly | PaymentType::Yearly => DEFAULT_VALIDITY_DAYS,
    };
    payment_date.saturating_add(days * DAY_MILLIS)
}

/// Derive status from the latest payment's `valid_until`
pub fn derive_status(latest_valid_until: Option<i64>, now: i64) -> MembershipStatus {
    match latest_valid_until {
        None => MembershipStatus::Inactive,
        Some(until) if now <= until => MembershipStatus::Active,
        Some(until) if now.saturating_sub(until) <= GRACE_PERIOD_DAYS * DAY_MILLIS => {
            MembershipStatus::Inactive
        }
        Some(_) => MembershipStatus::Deactivated,
    }
}

/// Whole days elapsed past `valid_until`, floored at 0
pub fn days_overdue(valid_until: i64, now: i64) -> i64 {
    now.saturating_sub(valid_until).max(0) / DAY_MILLIS
}

/// Latest payment by `payment_date`, ties broken by `created_at`
pub fn latest_payment<'a, I>(payments: I) -> Option<&'a Payment>
where
    I: IntoIterator<Item = &'a Payment>,
{
    payments
        .into_iter()
        .max_by_key(|p| (p.payment_date, p.created_at))
}

/// Status plus the dates it was derived from
pub fn summarize(member_id: &str, latest: Option<&Payment>, now: i64) -> MemberStatusSummary {
    let status = derive_status(latest.map(|p| p.valid_until), now);

    let (next_due_date, overdue) = match latest {
        Some(p) if status.is_active() => (Some(p.valid_until), None),
        Some(p) => (None, Some(days_overdue(p.valid_until, now))),
        None => (None, None),
    };

    MemberStatusSummary {
        member_id: member_id.to_string(),
        status,
        last_payment_date: latest.map(|p| p.payment_date),
        next_due_date,
        days_overdue: overdue,
    }
}
