//! Derived read models: status summary, fee summary, dashboard counts

use serde::{Deserialize, Serialize};

use super::MembershipStatus;

/// Membership status of one member plus the dates it was derived from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberStatusSummary {
    pub member_id: String,
    pub status: MembershipStatus,
    /// Date of the latest payment, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_payment_date: Option<i64>,
    /// `valid_until` of the latest payment, only while Active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_due_date: Option<i64>,
    /// Whole days past `valid_until`, only while not Active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_overdue: Option<i64>,
}

/// Revenue totals over the nested month/quarter/year windows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeSummary {
    pub monthly_total: f64,
    pub quarterly_total: f64,
    pub yearly_total: f64,
    pub total_members: i64,
    pub active_members: i64,
    pub total_payments: i64,
}

/// Dashboard counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_members: i64,
    pub active_members: i64,
    pub inactive_members: i64,
    pub deactivated_members: i64,
    /// Payments dated within the recent-collection window
    pub recent_collections: i64,
    pub recent_collections_total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_summary_omits_absent_dates() {
        let summary = MemberStatusSummary {
            member_id: "m1".into(),
            status: MembershipStatus::Inactive,
            last_payment_date: None,
            next_due_date: None,
            days_overdue: None,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json, serde_json::json!({"member_id": "m1", "status": "Inactive"}));
    }
}
