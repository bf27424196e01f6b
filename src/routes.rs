//! Top-level router configuration combining API and OAuth routes.
//!
//! # Route Structure
//!
//! - `GET /login`          - Start the operator login (browser)
//! - `GET /oauth2callback` - OAuth redirect target (browser)
//! - `GET /get-analytics`  - Aggregated view counts (dashboard, CORS)
//! - `GET /health`         - Service and session status
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Origin allow-list for the dashboard

use crate::api;
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use crate::web;
use axum::Router;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `allowed_origins` - origins granted cross-origin access
pub fn app_router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .merge(api::routes::routes())
        .merge(web::routes::routes())
        .with_state(state)
        .layer(cors::layer(allowed_origins))
        .layer(tracing::layer())
}
