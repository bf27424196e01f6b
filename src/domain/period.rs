//! Reporting period tokens and their resolution into calendar date ranges.
//!
//! The upstream reports API only accepts whole days, so every boundary is a
//! [`NaiveDate`] obtained by truncating "now" to midnight UTC.

use chrono::{DateTime, Days, NaiveDate, Utc};
use std::fmt;

/// Symbolic reporting window requested by the dashboard.
///
/// Unrecognized strings are kept verbatim in [`PeriodToken::Other`] and
/// resolve to the default seven-day window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodToken {
    Last24Hours,
    Last48Hours,
    Last7Days,
    Last30Days,
    Other(String),
}

impl PeriodToken {
    /// Lookback in days before any padding is applied.
    pub fn base_lookback_days(&self) -> u64 {
        match self {
            Self::Last24Hours => 1,
            Self::Last48Hours => 2,
            Self::Last7Days => 7,
            Self::Last30Days => 30,
            Self::Other(_) => 7,
        }
    }

    /// Returns true for the short windows affected by upstream data lag.
    pub fn is_short_window(&self) -> bool {
        matches!(self, Self::Last24Hours | Self::Last48Hours)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Last24Hours => "24h",
            Self::Last48Hours => "48h",
            Self::Last7Days => "7d",
            Self::Last30Days => "30d",
            Self::Other(raw) => raw,
        }
    }
}

impl From<&str> for PeriodToken {
    fn from(raw: &str) -> Self {
        match raw {
            "24h" => Self::Last24Hours,
            "48h" => Self::Last48Hours,
            "7d" => Self::Last7Days,
            "30d" => Self::Last30Days,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for PeriodToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive range of calendar dates (UTC).
///
/// Invariant: `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Start boundary formatted as `YYYY-MM-DD`.
    pub fn start_param(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    /// End boundary formatted as `YYYY-MM-DD`.
    pub fn end_param(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }

    /// Number of days between the boundaries.
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start_param(), self.end_param())
    }
}

/// Maps period tokens to date ranges anchored at a given instant.
///
/// `padding_days` is added to the lookback of the `24h` and `48h` windows
/// only. The upstream API publishes the most recent day or two late, and a
/// padding of 1 widens those windows enough to usually contain data. The
/// default is no padding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodResolver {
    padding_days: u64,
}

impl PeriodResolver {
    pub fn new(padding_days: u64) -> Self {
        Self { padding_days }
    }

    /// Total lookback for `period`, padding included.
    pub fn lookback_days(&self, period: &PeriodToken) -> u64 {
        if period.is_short_window() {
            period.base_lookback_days() + self.padding_days
        } else {
            period.base_lookback_days()
        }
    }

    /// Resolves `period` into an inclusive date range ending at `now`'s UTC date.
    ///
    /// Never fails: unknown tokens fall back to seven days.
    pub fn resolve(&self, period: &PeriodToken, now: DateTime<Utc>) -> DateRange {
        let end = now.date_naive();
        let start = end
            .checked_sub_days(Days::new(self.lookback_days(period)))
            .unwrap_or(NaiveDate::MIN);

        DateRange { start, end }
    }
}
