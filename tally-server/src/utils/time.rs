//! Time helpers — date parsing and timestamp conversion
//!
//! All date→timestamp conversion happens at the API/service layer;
//! the repository layer only receives `i64` Unix millis or `YYYY-MM-DD`
//! date strings.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

use super::{AppError, AppResult};

/// Current Unix timestamp in milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// Today's calendar date in server-local time, as `YYYY-MM-DD`
///
/// The daily income ledger keys on the local business day.
pub fn local_date_string() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Start of a UTC date → Unix millis
pub fn day_start_millis(date: NaiveDate) -> i64 {
    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap())
        .timestamp_millis()
}

/// End of a UTC date (23:59:59.999) → Unix millis
///
/// Window queries use `<= end` (inclusive) semantics.
pub fn day_end_millis(date: NaiveDate) -> i64 {
    Utc.from_utc_datetime(&date.and_hms_milli_opt(23, 59, 59, 999).unwrap())
        .timestamp_millis()
}

/// Format Unix millis as a human-readable UTC timestamp
pub fn format_millis(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_accepts_iso() {
        assert!(parse_date("2026-08-06").is_ok());
        assert!(parse_date("06/08/2026").is_err());
        assert!(parse_date("not-a-date").is_err());
    }

    #[test]
    fn test_day_bounds_cover_24_hours() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let start = day_start_millis(date);
        let end = day_end_millis(date);
        assert_eq!(end - start, 24 * 3600 * 1000 - 1);
    }

    #[test]
    fn test_format_millis_round_trips_midnight() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let formatted = format_millis(day_start_millis(date));
        assert_eq!(formatted, "2026-08-06 00:00:00");
    }
}
