//! Member Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Membership status, always derived from the payment trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum MembershipStatus {
    /// Latest payment still valid
    Active,
    /// No payment yet, or lapsed for at most the grace period
    #[default]
    Inactive,
    /// Lapsed for longer than the grace period
    Deactivated,
}

impl MembershipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Deactivated => "Deactivated",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Member entity (gym patron)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Member {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    /// Tier label, e.g. "Basic" or "Premium"
    pub membership_type: String,
    pub monthly_fee: f64,
    pub status: MembershipStatus,
    pub joining_date: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create member payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberCreate {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    pub membership_type: String,
    pub monthly_fee: f64,
    /// Defaults to the creation instant
    #[serde(default)]
    pub joining_date: Option<i64>,
}

/// Update member payload (all optional, status is not client-settable)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub membership_type: Option<String>,
    #[serde(default)]
    pub monthly_fee: Option<f64>,
}

impl MemberUpdate {
    /// True when the payload carries no field at all
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.membership_type.is_none()
            && self.monthly_fee.is_none()
    }
}

/// Response body for a successful delete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDeleted {
    pub message: String,
    pub deleted_payments: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_as_name() {
        let json = serde_json::to_string(&MembershipStatus::Deactivated).unwrap();
        assert_eq!(json, "\"Deactivated\"");
        let parsed: MembershipStatus = serde_json::from_str("\"Active\"").unwrap();
        assert_eq!(parsed, MembershipStatus::Active);
    }

    #[test]
    fn test_new_member_defaults_to_inactive() {
        assert_eq!(MembershipStatus::default(), MembershipStatus::Inactive);
    }

    #[test]
    fn test_member_create_optional_fields() {
        let json = r#"{"name":"Rahul Sharma","phone":"9876543210","membership_type":"Basic","monthly_fee":1500}"#;
        let create: MemberCreate = serde_json::from_str(json).unwrap();
        assert_eq!(create.monthly_fee, 1500.0);
        assert!(create.email.is_none());
        assert!(create.joining_date.is_none());
    }

    #[test]
    fn test_member_update_is_empty() {
        assert!(MemberUpdate::default().is_empty());
        let update: MemberUpdate = serde_json::from_str(r#"{"phone":"123"}"#).unwrap();
        assert!(!update.is_empty());
    }
}
