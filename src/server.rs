//! HTTP server initialization and runtime setup.
//!
//! Builds the upstream clients, the operator session and the Axum server.

use crate::config::Config;
use crate::domain::period::PeriodResolver;
use crate::domain::session::SessionStore;
use crate::infrastructure::google::{GoogleOAuthClient, YoutubeAnalyticsClient};
use crate::infrastructure::http::build_client;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Outbound HTTP client for Google
/// - OAuth and analytics clients
/// - Empty operator session
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP client or OAuth client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let http = build_client(config.upstream_timeout_secs).context("Failed to build HTTP client")?;

    let identity = GoogleOAuthClient::new(http.clone(), config.oauth.clone())
        .context("Invalid OAuth authorization URL")?;
    let analytics = YoutubeAnalyticsClient::new(http, config.analytics_base_url.clone());

    let session = Arc::new(SessionStore::new());
    tracing::info!("Session initialized (unauthenticated, visit /login)");

    let state = AppState::new(
        Arc::new(identity),
        Arc::new(analytics),
        session,
        PeriodResolver::new(config.lookback_padding_days),
    );

    let app = NormalizePathLayer::trim_trailing_slash()
        .layer(app_router(state, &config.allowed_origins));

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server running and listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
