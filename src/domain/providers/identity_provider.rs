//! OAuth2 identity provider interface.

use crate::domain::session::Credentials;
use crate::error::AppError;
use async_trait::async_trait;

/// OAuth2 authorization-code flow with PKCE.
///
/// # Implementations
///
/// - [`crate::infrastructure::google::GoogleOAuthClient`] - Google accounts
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Builds the consent URL the operator's browser is redirected to.
    ///
    /// `state` is echoed back on the callback; `code_challenge` is the
    /// S256 PKCE challenge.
    fn authorization_url(&self, state: &str, code_challenge: &str) -> String;

    /// Exchanges an authorization code for credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] when the token endpoint rejects the
    /// code or cannot be reached.
    async fn exchange_code(&self, code: &str, code_verifier: &str)
    -> Result<Credentials, AppError>;
}
