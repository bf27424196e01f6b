//! OAuth callback handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;

/// Query parameters Google appends to the redirect URI.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    /// Set instead of `code` when the operator denies consent.
    pub error: Option<String>,
}

/// Rendered after a successful login.
#[derive(Template, WebTemplate)]
#[template(path = "auth_success.html")]
struct AuthSuccessTemplate {}

/// Rendered when the login cannot be completed.
#[derive(Template, WebTemplate)]
#[template(path = "auth_failure.html")]
struct AuthFailureTemplate {
    message: String,
}

/// Completes the login started by [`super::login_handler`].
///
/// # Endpoint
///
/// `GET /oauth2callback?code=...&state=...`
///
/// # Response Codes
///
/// - **200 OK**: Credentials stored, success page rendered
/// - **400 Bad Request**: Consent denied, `code` missing, or unknown `state`
/// - **401 / 502 / 500**: Token exchange failed
pub async fn callback_handler(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Response {
    if let Some(error) = params.error.as_deref() {
        tracing::warn!(%error, "Authorization denied by provider");
        return failure(
            StatusCode::BAD_REQUEST,
            format!("Authorization was not granted ({error})."),
        );
    }

    let (Some(code), Some(login_state)) = (params.code.as_deref(), params.state.as_deref()) else {
        return failure(
            StatusCode::BAD_REQUEST,
            "The callback is missing the authorization code or state.".to_string(),
        );
    };

    match state.auth_service.complete_login(code, login_state).await {
        Ok(()) => AuthSuccessTemplate {}.into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Error completing login");
            failure(e.status(), failure_message(&e))
        }
    }
}

fn failure_message(e: &AppError) -> String {
    match e {
        AppError::Validation { .. } => {
            "This login link is no longer valid. Start again from /login.".to_string()
        }
        _ => "Authentication failed.".to_string(),
    }
}

fn failure(status: StatusCode, message: String) -> Response {
    (status, AuthFailureTemplate { message }).into_response()
}
