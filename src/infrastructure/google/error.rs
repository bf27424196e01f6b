//! Errors raised by the upstream HTTP clients.

use reqwest::StatusCode;
use serde_json::json;

use crate::error::AppError;

/// Failure talking to a Google endpoint.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("HTTP {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl UpstreamError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Request(e) => e.status(),
        }
    }
}

impl From<UpstreamError> for AppError {
    fn from(e: UpstreamError) -> Self {
        tracing::warn!(error = %e, "Upstream request failed");

        match e.status() {
            Some(StatusCode::UNAUTHORIZED) => AppError::unauthorized(
                "Upstream rejected the stored credentials. Visit /login to authorize the relay again.",
                json!({ "upstream_status": 401 }),
            ),
            Some(status) => AppError::upstream(
                "Upstream request failed",
                json!({ "upstream_status": status.as_u16() }),
            ),
            None => AppError::upstream(
                "Upstream request failed",
                json!({ "reason": e.to_string() }),
            ),
        }
    }
}
