//! # Analytics Relay
//!
//! A small backend that lets a browser dashboard read a YouTube channel's
//! view counts without ever holding the channel owner's Google credentials.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Reporting periods, report aggregation, the operator session and provider traits
//! - **Application Layer** ([`application`]) - Login flow and report orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - Google OAuth2 and YouTube Analytics clients
//! - **API Layer** ([`api`]) - JSON endpoints, DTOs, and middleware
//! - **Web Layer** ([`web`]) - Browser-facing login and OAuth callback pages
//!
//! ## Flow
//!
//! 1. The operator opens `/login` and consents on Google's page
//! 2. Google redirects to `/oauth2callback`; the code is exchanged for credentials
//! 3. The dashboard calls `/get-analytics?period=7d` and receives the upstream
//!    report with an extra `totalViews` field
//!
//! ## Quick Start
//!
//! ```bash
//! export OAUTH_CLIENT_ID="...apps.googleusercontent.com"
//! export OAUTH_CLIENT_SECRET="..."
//! export OAUTH_REDIRECT_URL="http://localhost:3000/oauth2callback"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AnalyticsService, AuthService};
    pub use crate::domain::period::{DateRange, PeriodResolver, PeriodToken};
    pub use crate::domain::report::ReportResult;
    pub use crate::domain::session::{Credentials, SessionStatus, SessionStore};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
