//! Cross-origin access for the dashboard.

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Creates the CORS layer for the given origin allow-list.
///
/// Only listed origins receive `Access-Control-Allow-Origin`; the browser
/// then blocks responses for every other origin. Requests without an
/// `Origin` header (curl, server-to-server) are not affected.
///
/// Entries that are not valid header values are skipped with a warning.
/// [`crate::config::Config::validate`] rejects them before startup.
pub fn layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}
