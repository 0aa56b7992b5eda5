//! Income statistics
//!
//! Reshapes sparse per-bucket aggregation rows from the store into a
//! complete, zero-filled time series: exactly one entry per hour of the day
//! (daily) or per calendar date in the window (weekly/monthly), in
//! ascending order. A plain group-by cannot guarantee this — buckets with
//! no bills are absent from the store's result — so completion happens
//! here.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::db::repository::IncomeBucketRow;
use crate::utils::money::round2;
use crate::utils::time::{day_end_millis, day_start_millis};

/// Reporting period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsPeriod {
    Daily,
    Weekly,
    Monthly,
}

impl StatsPeriod {
    /// Parse a period string; anything unrecognised falls back to daily
    pub fn parse(s: &str) -> Self {
        match s {
            "weekly" => Self::Weekly,
            "monthly" => Self::Monthly,
            _ => Self::Daily,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

/// Query window and bucket granularity for a period
#[derive(Debug, Clone, Copy)]
pub struct StatsWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_millis: i64,
    pub end_millis: i64,
    /// Hour-of-day buckets when true, calendar-date buckets otherwise
    pub hourly: bool,
}

/// Compute the query window for a period, ending today (UTC)
///
/// - daily: start of today through end of today, hour buckets
/// - weekly: the last 7 days through end of today, date buckets
/// - monthly: the last 30 days through end of today, date buckets
pub fn period_window(period: StatsPeriod, today: NaiveDate) -> StatsWindow {
    let (start_date, hourly) = match period {
        StatsPeriod::Daily => (today, true),
        StatsPeriod::Weekly => (today - Duration::days(7), false),
        StatsPeriod::Monthly => (today - Duration::days(30), false),
    };

    StatsWindow {
        start_date,
        end_date: today,
        start_millis: day_start_millis(start_date),
        end_millis: day_end_millis(today),
        hourly,
    }
}

/// One entry of the reported time series
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeBucket {
    pub label: String,
    pub total_income: f64,
    pub total_bills: i64,
    pub average_ticket_size: f64,
}

/// Complete the sparse aggregation rows over the full window
///
/// The result has one bucket per slot, ascending, with zero values where
/// the store returned nothing. Amounts are rounded to 2 decimal places.
pub fn fill_missing_buckets(rows: Vec<IncomeBucketRow>, window: &StatsWindow) -> Vec<IncomeBucket> {
    let by_label: HashMap<String, IncomeBucketRow> =
        rows.into_iter().map(|r| (r.label.clone(), r)).collect();

    let mut filled = Vec::new();

    if window.hourly {
        for hour in 0..24 {
            let label = format!("{:02}:00", hour);
            filled.push(bucket_for(&by_label, label));
        }
    } else {
        let mut date = window.start_date;
        while date <= window.end_date {
            let label = date.format("%Y-%m-%d").to_string();
            filled.push(bucket_for(&by_label, label));
            date = date + Duration::days(1);
        }
    }

    filled
}

fn bucket_for(by_label: &HashMap<String, IncomeBucketRow>, label: String) -> IncomeBucket {
    match by_label.get(&label) {
        Some(row) => IncomeBucket {
            label,
            total_income: round2(row.total_income),
            total_bills: row.total_bills,
            average_ticket_size: round2(row.average_ticket),
        },
        None => IncomeBucket {
            label,
            total_income: 0.0,
            total_bills: 0,
            average_ticket_size: 0.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn row(label: &str, income: f64, bills: i64, avg: f64) -> IncomeBucketRow {
        IncomeBucketRow {
            label: label.to_string(),
            total_income: income,
            total_bills: bills,
            average_ticket: avg,
        }
    }

    #[test]
    fn test_period_parse_defaults_to_daily() {
        assert_eq!(StatsPeriod::parse("weekly"), StatsPeriod::Weekly);
        assert_eq!(StatsPeriod::parse("monthly"), StatsPeriod::Monthly);
        assert_eq!(StatsPeriod::parse("daily"), StatsPeriod::Daily);
        assert_eq!(StatsPeriod::parse("yearly"), StatsPeriod::Daily);
        assert_eq!(StatsPeriod::parse(""), StatsPeriod::Daily);
    }

    #[test]
    fn test_daily_window_is_one_day_of_hour_buckets() {
        let today = date("2026-08-06");
        let window = period_window(StatsPeriod::Daily, today);

        assert!(window.hourly);
        assert_eq!(window.start_date, today);
        assert_eq!(window.end_date, today);
        assert_eq!(
            window.end_millis - window.start_millis,
            24 * 3600 * 1000 - 1
        );
    }

    #[test]
    fn test_weekly_window_spans_eight_dates() {
        let today = date("2026-08-06");
        let window = period_window(StatsPeriod::Weekly, today);

        assert!(!window.hourly);
        assert_eq!(window.start_date, date("2026-07-30"));
        assert_eq!(window.end_date, today);
    }

    #[test]
    fn test_daily_fill_yields_24_ascending_buckets_when_empty() {
        let window = period_window(StatsPeriod::Daily, date("2026-08-06"));
        let filled = fill_missing_buckets(Vec::new(), &window);

        assert_eq!(filled.len(), 24);
        assert_eq!(filled[0].label, "00:00");
        assert_eq!(filled[23].label, "23:00");
        for pair in filled.windows(2) {
            assert!(pair[0].label < pair[1].label);
        }
        for bucket in &filled {
            assert_eq!(bucket.total_income, 0.0);
            assert_eq!(bucket.total_bills, 0);
            assert_eq!(bucket.average_ticket_size, 0.0);
        }
    }

    #[test]
    fn test_daily_fill_keeps_populated_buckets_in_place() {
        let window = period_window(StatsPeriod::Daily, date("2026-08-06"));
        let rows = vec![row("05:00", 120.456, 3, 40.152), row("18:00", 75.0, 1, 75.0)];
        let filled = fill_missing_buckets(rows, &window);

        assert_eq!(filled.len(), 24);
        assert_eq!(filled[5].total_income, 120.46);
        assert_eq!(filled[5].total_bills, 3);
        assert_eq!(filled[5].average_ticket_size, 40.15);
        assert_eq!(filled[18].total_income, 75.0);
        assert_eq!(filled[4].total_bills, 0);
    }

    #[test]
    fn test_weekly_fill_covers_every_date_in_range() {
        let window = period_window(StatsPeriod::Weekly, date("2026-08-06"));
        let rows = vec![row("2026-08-01", 10.0, 1, 10.0)];
        let filled = fill_missing_buckets(rows, &window);

        assert_eq!(filled.len(), 8);
        assert_eq!(filled[0].label, "2026-07-30");
        assert_eq!(filled[7].label, "2026-08-06");
        let populated: Vec<_> = filled.iter().filter(|b| b.total_bills > 0).collect();
        assert_eq!(populated.len(), 1);
        assert_eq!(populated[0].label, "2026-08-01");
    }

    #[test]
    fn test_monthly_fill_covers_31_dates() {
        let window = period_window(StatsPeriod::Monthly, date("2026-08-06"));
        let filled = fill_missing_buckets(Vec::new(), &window);
        assert_eq!(filled.len(), 31);
    }
}
