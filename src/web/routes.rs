//! OAuth route configuration.

use crate::state::AppState;
use crate::web::handlers::{callback_handler, login_handler};
use axum::{Router, routing::get};

/// Login flow routes.
///
/// # Endpoints
///
/// - `GET /login`          - Redirect to the Google consent screen
/// - `GET /oauth2callback` - Completes the login and renders the result page
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_handler))
        .route("/oauth2callback", get(callback_handler))
}
