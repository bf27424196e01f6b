//! Login redirect handler.

use axum::{extract::State, response::Redirect};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects the operator's browser to the Google consent screen.
///
/// # Endpoint
///
/// `GET /login`
///
/// Each call starts a new login attempt; earlier attempts stay valid until
/// they expire, so a reloaded tab does not break the flow.
pub async fn login_handler(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let url = state.auth_service.begin_login().await?;

    tracing::info!("Redirecting operator to the consent screen");

    Ok(Redirect::to(&url))
}
