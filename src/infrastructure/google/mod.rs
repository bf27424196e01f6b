//! Google OAuth2 and YouTube Analytics clients.
//!
//! - [`GoogleOAuthClient`] - implements [`crate::domain::providers::IdentityProvider`]
//! - [`YoutubeAnalyticsClient`] - implements [`crate::domain::providers::AnalyticsProvider`]

mod analytics_client;
mod error;
mod oauth_client;

pub use analytics_client::{DEFAULT_ANALYTICS_BASE_URL, YoutubeAnalyticsClient};
pub use error::UpstreamError;
pub use oauth_client::{
    DEFAULT_AUTH_URL, DEFAULT_TOKEN_URL, GoogleOAuthClient, OAuthSettings, SCOPES,
};
