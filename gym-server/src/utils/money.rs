//! Money helpers using rust_decimal for precision
//!
//! Amounts are stored and serialized as `f64`; every sum goes through
//! `Decimal` and is rounded to 2 decimal places on the way out.

use rust_decimal::prelude::*;

use crate::utils::{AppError, ErrorCode};

/// Rounding strategy for monetary values (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed payment amount
pub const MAX_PAYMENT_AMOUNT: f64 = 1_000_000.0;

/// Maximum allowed monthly fee
pub const MAX_MONTHLY_FEE: f64 = 1_000_000.0;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        // SAFETY: sums of amounts bounded at the API boundary stay far inside f64 range
        .expect("Decimal rounded to 2dp is always representable as f64")
}

/// Validate a monetary input: finite, non-negative, not above `max`
pub fn validate_amount(value: f64, field: &str, max: f64) -> Result<(), AppError> {
    if !value.is_finite() {
        return Err(AppError::with_message(
            ErrorCode::InvalidAmount,
            format!("{field} must be a finite number, got {value}"),
        )
        .with_detail("field", field));
    }
    if value < 0.0 {
        return Err(AppError::with_message(
            ErrorCode::InvalidAmount,
            format!("{field} must be non-negative, got {value}"),
        )
        .with_detail("field", field));
    }
    if value > max {
        return Err(AppError::with_message(
            ErrorCode::InvalidAmount,
            format!("{field} exceeds maximum allowed ({max}), got {value}"),
        )
        .with_detail("field", field));
    }
    Ok(())
}
