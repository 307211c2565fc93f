//! Payment (fee collection) Model

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Billing period a payment covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum PaymentType {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown payment type tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePaymentTypeError(pub String);

impl fmt::Display for ParsePaymentTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown payment type: {}", self.0)
    }
}

impl std::error::Error for ParsePaymentTypeError {}

impl FromStr for PaymentType {
    type Err = ParsePaymentTypeError;

    /// Case-insensitive: "Monthly", "monthly" and "MONTHLY" are the same tag.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(ParsePaymentTypeError(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for PaymentType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Payment entity (one fee transaction tied to a member)
///
/// Immutable once written; removed only together with its member.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Payment {
    pub id: String,
    pub member_id: String,
    /// Member name at the time of payment
    pub member_name: String,
    pub amount: f64,
    pub payment_type: PaymentType,
    pub payment_date: i64,
    /// Instant through which this payment keeps the member Active
    pub valid_until: i64,
    pub notes: Option<String>,
    pub created_at: i64,
}

/// Create payment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCreate {
    pub member_id: String,
    pub amount: f64,
    /// Parsed case-insensitively, defaults to monthly
    #[serde(default)]
    pub payment_type: Option<String>,
    /// Defaults to the creation instant
    #[serde(default)]
    pub payment_date: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Query string for `GET /api/payments`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentQuery {
    pub member_id: Option<String>,
}
