//! Time-window construction for the external search-trend service.
//!
//! The trend client expects a window of the form `YYYY-MM-01 YYYY-MM-01`,
//! built from the starting month of each bounding quarter.

use chrono::NaiveDate;

use crate::quarter::Quarter;

/// Builds the trend-service time window for the queried bounds. A missing
/// quarter defaults to Q1, matching the window the legacy payload builder
/// produced.
pub fn trend_timeframe(
    start_year: i32,
    end_year: i32,
    start_quarter: Option<Quarter>,
    end_quarter: Option<Quarter>,
) -> String {
    let start = month_start(start_year, start_quarter.unwrap_or(Quarter::Q1));
    let end = month_start(end_year, end_quarter.unwrap_or(Quarter::Q1));
    format!("{start} {end}")
}

fn month_start(year: i32, quarter: Quarter) -> String {
    match NaiveDate::from_ymd_opt(year, quarter.starting_month(), 1) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        // Quarter starting months are always valid; plain fallback.
        None => format!("{year}-{:02}-01", quarter.starting_month()),
    }
}
