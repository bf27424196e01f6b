//! YouTube Analytics API v2 client.

use async_trait::async_trait;
use reqwest::Client;

use super::error::UpstreamError;
use crate::domain::providers::{AnalyticsProvider, ReportQuery};
use crate::domain::report::ReportResult;
use crate::domain::session::Credentials;
use crate::error::AppError;

pub const DEFAULT_ANALYTICS_BASE_URL: &str = "https://youtubeanalytics.googleapis.com/v2";

/// [`AnalyticsProvider`] calling the `reports` endpoint of YouTube Analytics.
#[derive(Clone)]
pub struct YoutubeAnalyticsClient {
    http: Client,
    base_url: String,
}

impl YoutubeAnalyticsClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn reports_url(&self) -> String {
        format!("{}/reports", self.base_url)
    }

    async fn fetch(
        &self,
        credentials: &Credentials,
        query: &ReportQuery,
    ) -> Result<ReportResult, UpstreamError> {
        let response = self
            .http
            .get(self.reports_url())
            .bearer_auth(&credentials.access_token)
            .query(&query.to_params())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Http { status, body });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl AnalyticsProvider for YoutubeAnalyticsClient {
    async fn query_report(
        &self,
        credentials: &Credentials,
        query: &ReportQuery,
    ) -> Result<ReportResult, AppError> {
        let report = self.fetch(credentials, query).await?;

        tracing::debug!(
            start = %query.range.start_param(),
            end = %query.range.end_param(),
            rows = report
                .get("rows")
                .and_then(|rows| rows.as_array())
                .map_or(0, |rows| rows.len()),
            "Analytics report received"
        );

        Ok(report)
    }
}
