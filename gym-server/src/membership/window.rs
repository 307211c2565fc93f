//! Fee window boundaries (UTC calendar)

use chrono::{DateTime, Datelike, TimeZone, Utc};
use shared::util::DAY_MILLIS;

/// Start instants of the three nested aggregation windows, in Unix millis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeWindows {
    /// Jan 1 of the current year
    pub year_start: i64,
    /// Start of the quarter window (see [`FeeWindows::at`])
    pub quarter_start: i64,
    /// First day of the current month
    pub month_start: i64,
}

impl FeeWindows {
    /// Compute the windows relative to `now`
    ///
    /// The quarter window starts at Oct 1 of the previous year for Jan-Mar,
    /// Jan 1 for Apr-Jun, Apr 1 for Jul-Sep and Jul 1 for Oct-Dec.
    pub fn at(now: i64) -> Self {
        let now = DateTime::<Utc>::from_timestamp_millis(now).unwrap_or_default();
        let year = now.year();
        let month = now.month();

        let (quarter_year, quarter_month) = match month {
            1..=3 => (year - 1, 10),
            4..=6 => (year, 1),
            7..=9 => (year, 4),
            _ => (year, 7),
        };

        Self {
            year_start: month_start_millis(year, 1),
            quarter_start: month_start_millis(quarter_year, quarter_month),
            month_start: month_start_millis(year, month),
        }
    }
}

/// Start of the trailing `days`-day window ending at `now`
pub fn trailing_window_start(now: i64, days: i64) -> i64 {
    now - days * DAY_MILLIS
}

fn month_start_millis(year: i32, month: u32) -> i64 {
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .map(|dt| dt.timestamp_millis())
        // SAFETY: the first day of any month at midnight is unambiguous in UTC
        .expect("first day of a month is always a valid UTC instant")
}
