//! View-count reporting service.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::period::{PeriodResolver, PeriodToken};
use crate::domain::providers::{AnalyticsProvider, ReportQuery};
use crate::domain::report::{self, ReportResult};
use crate::domain::session::Credentials;
use crate::error::AppError;

/// Service producing aggregated view reports for a reporting period.
///
/// Resolves the period into a date range, queries daily views for the
/// operator's channel and adds `totalViews` to the upstream report.
pub struct AnalyticsService<P: AnalyticsProvider + ?Sized> {
    provider: Arc<P>,
    resolver: PeriodResolver,
}

impl<P: AnalyticsProvider + ?Sized> AnalyticsService<P> {
    /// Creates a new analytics service.
    pub fn new(provider: Arc<P>, resolver: PeriodResolver) -> Self {
        Self { provider, resolver }
    }

    /// Fetches and aggregates the daily views report for `period`, with
    /// boundaries anchored at `now`.
    ///
    /// An empty upstream result is not an error: the report comes back
    /// with `rows: []` and `totalViews: 0`.
    ///
    /// # Errors
    ///
    /// Propagates [`AppError::Unauthorized`] and [`AppError::Upstream`] from
    /// the provider.
    pub async fn views_report(
        &self,
        credentials: &Credentials,
        period: &PeriodToken,
        now: DateTime<Utc>,
    ) -> Result<ReportResult, AppError> {
        let range = self.resolver.resolve(period, now);
        let query = ReportQuery::daily_views(range);

        tracing::info!(%period, %range, "Fetching views report");

        let raw = self.provider.query_report(credentials, &query).await?;

        let aggregated = report::aggregate(&raw, query.value_column());

        tracing::debug!(
            %period,
            total_views = ?aggregated.get(report::TOTAL_VIEWS_FIELD),
            "Views report aggregated"
        );

        Ok(aggregated)
    }
}
