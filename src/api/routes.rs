//! API route configuration.

use crate::api::handlers::{analytics_handler, health_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// JSON API routes.
///
/// # Endpoints
///
/// - `GET /get-analytics?period=` - Aggregated views for a reporting period
/// - `GET /health`                - Service and session status
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/get-analytics", get(analytics_handler))
        .route("/health", get(health_handler))
}
