//! Handler for aggregated view counts.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;

use crate::api::dto::analytics::AnalyticsQuery;
use crate::domain::report::ReportResult;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the channel's views for a reporting period.
///
/// # Endpoint
///
/// `GET /get-analytics?period=7d`
///
/// # Query Parameters
///
/// - `period` (required): `24h`, `48h`, `7d` or `30d`; any other value
///   selects the last 7 days
///
/// # Response
///
/// The upstream report with an added `totalViews` field:
///
/// ```json
/// {
///   "kind": "youtubeAnalytics#resultTable",
///   "columnHeaders": [...],
///   "rows": [["2024-03-09", 5], ["2024-03-10", 7]],
///   "totalViews": 12
/// }
/// ```
///
/// # Errors
///
/// Returns 401 Unauthorized if the operator has not logged in.
/// Returns 400 Bad Request if `period` is missing.
/// Returns 502 Bad Gateway if the analytics API call fails.
pub async fn analytics_handler(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsQuery>,
) -> Result<Json<ReportResult>, AppError> {
    let credentials = state.auth_service.credentials().await?;
    let period = params.period()?;

    let report = state
        .analytics_service
        .views_report(&credentials, &period, Utc::now())
        .await
        .inspect_err(|e| tracing::error!(%period, error = %e, "Error fetching analytics data"))?;

    Ok(Json(report))
}
