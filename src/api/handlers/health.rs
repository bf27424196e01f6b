//! Handler for health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::domain::session::SessionStatus;
use crate::state::AppState;

/// Returns service health with the operator session status.
///
/// # Endpoint
///
/// `GET /health`
///
/// Always answers 200: a missing login is reported, not treated as an outage.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "session": {
///       "status": "unauthenticated",
///       "message": "Visit /login to authorize the relay"
///     }
///   }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let session = state.auth_service.status().await;

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            session: check_session(session),
        },
    })
}

fn check_session(status: SessionStatus) -> CheckStatus {
    let message = match status {
        SessionStatus::Authenticated => None,
        SessionStatus::Unauthenticated => Some("Visit /login to authorize the relay".to_string()),
        SessionStatus::Expired => Some("Credentials expired, visit /login again".to_string()),
    };

    CheckStatus {
        status: status.as_str().to_string(),
        message,
    }
}
