//! Revenue Aggregator
//!
//! Sums are strictly nested: a payment counts toward the quarter only if it is
//! inside the year, and toward the month only if it is inside the quarter.

use rust_decimal::Decimal;
use shared::models::Payment;

use super::window::FeeWindows;
use crate::utils::money::{to_decimal, to_f64};

/// Nested fee totals, rounded to 2 decimal places
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RevenueTotals {
    pub monthly: f64,
    pub quarterly: f64,
    pub yearly: f64,
}

/// Aggregate payment amounts into the windows around `now`
pub fn aggregate<'a, I>(payments: I, now: i64) -> RevenueTotals
where
    I: IntoIterator<Item = &'a Payment>,
{
    let windows = FeeWindows::at(now);

    let mut yearly = Decimal::ZERO;
    let mut quarterly = Decimal::ZERO;
    let mut monthly = Decimal::ZERO;

    for payment in payments {
        if payment.payment_date < windows.year_start {
            continue;
        }
        let amount = to_decimal(payment.amount);
        yearly += amount;

        if payment.payment_date < windows.quarter_start {
            continue;
        }
        quarterly += amount;

        if payment.payment_date >= windows.month_start {
            monthly += amount;
        }
    }

    RevenueTotals {
        monthly: to_f64(monthly),
        quarterly: to_f64(quarterly),
        yearly: to_f64(yearly),
    }
}
