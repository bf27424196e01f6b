//! Analytics report provider interface.

use crate::domain::period::DateRange;
use crate::domain::report::ReportResult;
use crate::domain::session::Credentials;
use crate::error::AppError;
use async_trait::async_trait;

/// Report identifier for the authenticated operator's own channel.
pub const OWN_CHANNEL: &str = "channel==MINE";

/// Parameters of a single report query.
///
/// Rows come back with one cell per dimension followed by one cell per
/// metric, in the order listed here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
    pub ids: String,
    pub range: DateRange,
    pub metrics: Vec<String>,
    pub dimensions: Vec<String>,
}

impl ReportQuery {
    /// Daily views of the operator's channel over `range`.
    ///
    /// Rows are `[day, views]`, so [`Self::value_column`] is 1.
    pub fn daily_views(range: DateRange) -> Self {
        Self {
            ids: OWN_CHANNEL.to_string(),
            range,
            metrics: vec!["views".to_string()],
            dimensions: vec!["day".to_string()],
        }
    }

    /// Index of the first metric cell in each row.
    pub fn value_column(&self) -> usize {
        self.dimensions.len()
    }

    /// Query string parameters in the upstream API's naming.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("ids", self.ids.clone()),
            ("startDate", self.range.start_param()),
            ("endDate", self.range.end_param()),
            ("metrics", self.metrics.join(",")),
        ];

        if !self.dimensions.is_empty() {
            params.push(("dimensions", self.dimensions.join(",")));
            params.push(("sort", self.dimensions.join(",")));
        }

        params
    }
}

/// Fetches analytics reports on behalf of the operator.
///
/// # Implementations
///
/// - [`crate::infrastructure::google::YoutubeAnalyticsClient`] - YouTube Analytics v2
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsProvider: Send + Sync {
    /// Runs `query` with the operator's `credentials`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the provider rejects the
    /// credentials and [`AppError::Upstream`] on any other failure.
    async fn query_report(
        &self,
        credentials: &Credentials,
        query: &ReportQuery,
    ) -> Result<ReportResult, AppError>;
}
