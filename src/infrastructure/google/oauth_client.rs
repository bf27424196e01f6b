//! Google OAuth2 client (authorization-code flow with PKCE).

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use url::Url;

use super::error::UpstreamError;
use crate::domain::providers::IdentityProvider;
use crate::domain::session::Credentials;
use crate::error::AppError;
use crate::utils::secrets::mask_secret;

pub const DEFAULT_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Read-only access to the channel and its analytics.
pub const SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/youtube.readonly",
    "https://www.googleapis.com/auth/yt-analytics.readonly",
];

/// OAuth client registration and endpoints.
#[derive(Clone)]
pub struct OAuthSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
    pub auth_url: String,
    pub token_url: String,
}

impl fmt::Debug for OAuthSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthSettings")
            .field("client_id", &self.client_id)
            .field("client_secret", &mask_secret(&self.client_secret))
            .field("redirect_url", &self.redirect_url)
            .field("auth_url", &self.auth_url)
            .field("token_url", &self.token_url)
            .finish()
    }
}

/// Token endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default = "default_token_type")]
    token_type: String,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl TokenResponse {
    /// An `expires_in` that does not fit a timestamp is treated as no expiry.
    fn into_credentials(self, issued_at: DateTime<Utc>) -> Credentials {
        let expires_at = self.expires_in.and_then(|secs| {
            let at = TimeDelta::try_seconds(secs).and_then(|d| issued_at.checked_add_signed(d));
            if at.is_none() {
                tracing::warn!(expires_in = secs, "Ignoring out-of-range token lifetime");
            }
            at
        });

        Credentials {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            scope: self.scope,
            token_type: self.token_type,
        }
    }
}

/// [`IdentityProvider`] backed by Google accounts.
///
/// Requests offline access so Google also issues a refresh token, and
/// includes previously granted scopes.
pub struct GoogleOAuthClient {
    http: Client,
    settings: OAuthSettings,
    auth_url: Url,
}

impl GoogleOAuthClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if `settings.auth_url` is not a valid URL.
    pub fn new(http: Client, settings: OAuthSettings) -> Result<Self, url::ParseError> {
        let auth_url = Url::parse(&settings.auth_url)?;

        Ok(Self {
            http,
            settings,
            auth_url,
        })
    }

    async fn request_token(
        &self,
        code: &str,
        code_verifier: &str,
    ) -> Result<Credentials, UpstreamError> {
        let params = [
            ("code", code),
            ("client_id", self.settings.client_id.as_str()),
            ("client_secret", self.settings.client_secret.as_str()),
            ("redirect_uri", self.settings.redirect_url.as_str()),
            ("grant_type", "authorization_code"),
            ("code_verifier", code_verifier),
        ];

        let issued_at = Utc::now();
        let response = self
            .http
            .post(&self.settings.token_url)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Http { status, body });
        }

        let token: TokenResponse = response.json().await?;

        Ok(token.into_credentials(issued_at))
    }
}

#[async_trait]
impl IdentityProvider for GoogleOAuthClient {
    fn authorization_url(&self, state: &str, code_challenge: &str) -> String {
        let mut url = self.auth_url.clone();

        url.query_pairs_mut()
            .append_pair("client_id", &self.settings.client_id)
            .append_pair("redirect_uri", &self.settings.redirect_url)
            .append_pair("response_type", "code")
            .append_pair("scope", &SCOPES.join(" "))
            .append_pair("access_type", "offline")
            .append_pair("include_granted_scopes", "true")
            .append_pair("state", state)
            .append_pair("code_challenge", code_challenge)
            .append_pair("code_challenge_method", "S256");

        url.into()
    }

    async fn exchange_code(
        &self,
        code: &str,
        code_verifier: &str,
    ) -> Result<Credentials, AppError> {
        match self.request_token(code, code_verifier).await {
            Ok(credentials) => Ok(credentials),
            // 401 from the token endpoint means a bad client registration,
            // not a bad operator session.
            Err(UpstreamError::Http { status, body }) => {
                tracing::error!(%status, %body, "Token exchange rejected");
                Err(AppError::upstream(
                    "Token exchange failed",
                    serde_json::json!({ "upstream_status": status.as_u16() }),
                ))
            }
            Err(e) => Err(e.into()),
        }
    }
}
