//! Operator authentication service.

use chrono::{DateTime, Utc};
use serde_json::json;
use std::sync::Arc;

use crate::domain::providers::IdentityProvider;
use crate::domain::session::{
    Credentials, PendingLogin, SessionStatus, SessionStore,
};
use crate::error::AppError;
use crate::utils::pkce;

/// Service driving the OAuth2 login flow and guarding access to the session.
///
/// Each `/login` creates a [`PendingLogin`] keyed by a random `state`; the
/// callback must present that `state` within the pending-login TTL. The PKCE
/// verifier never leaves the server.
pub struct AuthService<P: IdentityProvider + ?Sized> {
    provider: Arc<P>,
    session: Arc<SessionStore>,
}

impl<P: IdentityProvider + ?Sized> AuthService<P> {
    /// Creates a new authentication service.
    pub fn new(provider: Arc<P>, session: Arc<SessionStore>) -> Self {
        Self { provider, session }
    }

    /// Starts a login attempt and returns the provider consent URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if random values cannot be generated.
    pub async fn begin_login(&self) -> Result<String, AppError> {
        let state = pkce::generate_state()?;
        let pair = pkce::generate_pkce()?;

        let url = self.provider.authorization_url(&state, &pair.challenge);

        self.session
            .begin_login(PendingLogin {
                state,
                code_verifier: pair.verifier,
                created_at: Utc::now(),
            })
            .await;

        Ok(url)
    }

    /// Completes a login attempt with the code returned on the callback.
    ///
    /// On success the granted credentials replace any previous ones.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `state` does not match a fresh
    /// login attempt. Returns [`AppError::Upstream`] if the code exchange
    /// fails; the session is left unchanged in both cases.
    pub async fn complete_login(&self, code: &str, state: &str) -> Result<(), AppError> {
        let pending = self
            .session
            .take_pending(state, Utc::now())
            .await
            .ok_or_else(|| {
                AppError::bad_request(
                    "Login attempt not recognized or expired",
                    json!({ "reason": "Unknown or stale state parameter" }),
                )
            })?;

        let credentials = self
            .provider
            .exchange_code(code, &pending.code_verifier)
            .await?;

        tracing::info!(
            expires_at = ?credentials.expires_at,
            has_refresh_token = credentials.refresh_token.is_some(),
            "Operator authenticated"
        );

        self.session.authenticate(credentials).await;

        Ok(())
    }

    /// Returns the operator's usable credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] when no login has completed or the
    /// credentials have expired.
    pub async fn credentials(&self) -> Result<Credentials, AppError> {
        self.credentials_at(Utc::now()).await
    }

    async fn credentials_at(&self, now: DateTime<Utc>) -> Result<Credentials, AppError> {
        let session = self.session.snapshot().await;
        if let Some(credentials) = session.credentials_at(now) {
            return Ok(credentials.clone());
        }

        let status = session.status_at(now);
        let message = match status {
            SessionStatus::Expired => "Session expired. Visit /login to authorize the relay again.",
            _ => "User not authenticated. Visit /login to authorize the relay.",
        };

        Err(AppError::unauthorized(
            message,
            json!({ "session": status.as_str() }),
        ))
    }

    /// Current session status, for the health endpoint.
    pub async fn status(&self) -> SessionStatus {
        self.session.status_at(Utc::now()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::providers::MockIdentityProvider;
    use chrono::TimeDelta;

    fn credentials(expires_at: Option<DateTime<Utc>>) -> Credentials {
        Credentials {
            access_token: "ya29.token".to_string(),
            refresh_token: None,
            expires_at,
            scope: Some("https://www.googleapis.com/auth/yt-analytics.readonly".to_string()),
            token_type: "Bearer".to_string(),
        }
    }

    fn consent_url_mock() -> MockIdentityProvider {
        let mut mock = MockIdentityProvider::new();
        mock.expect_authorization_url()
            .returning(|state, challenge| {
                format!("https://accounts.example.test/auth?state={state}&code_challenge={challenge}")
            });
        mock
    }

    fn state_from(url: &str) -> String {
        url::Url::parse(url)
            .unwrap()
            .query_pairs()
            .find(|(k, _)| k == "state")
            .map(|(_, v)| v.into_owned())
            .unwrap()
    }

    #[tokio::test]
    async fn test_begin_login_returns_consent_url() {
        let session = Arc::new(SessionStore::new());
        let service = AuthService::new(Arc::new(consent_url_mock()), session);

        let url = service.begin_login().await.unwrap();

        assert!(url.starts_with("https://accounts.example.test/auth?state="));
        assert!(url.contains("code_challenge="));
    }

    #[tokio::test]
    async fn test_complete_login_stores_credentials() {
        let mut mock = consent_url_mock();
        mock.expect_exchange_code()
            .withf(|code, verifier| code == "auth-code" && verifier.len() == 43)
            .times(1)
            .returning(|_, _| Ok(credentials(None)));

        let session = Arc::new(SessionStore::new());
        let service = AuthService::new(Arc::new(mock), session.clone());

        let url = service.begin_login().await.unwrap();
        let result = service.complete_login("auth-code", &state_from(&url)).await;

        assert!(result.is_ok());
        assert_eq!(service.status().await, SessionStatus::Authenticated);
        assert_eq!(service.credentials().await.unwrap().access_token, "ya29.token");
    }

    #[tokio::test]
    async fn test_complete_login_rejects_unknown_state() {
        let mut mock = consent_url_mock();
        mock.expect_exchange_code().times(0);

        let session = Arc::new(SessionStore::new());
        let service = AuthService::new(Arc::new(mock), session);

        service.begin_login().await.unwrap();
        let result = service.complete_login("auth-code", "forged").await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
        assert_eq!(service.status().await, SessionStatus::Unauthenticated);
    }

    #[tokio::test]
    async fn test_state_cannot_be_replayed() {
        let mut mock = consent_url_mock();
        mock.expect_exchange_code()
            .times(1)
            .returning(|_, _| Ok(credentials(None)));

        let service = AuthService::new(Arc::new(mock), Arc::new(SessionStore::new()));

        let state = state_from(&service.begin_login().await.unwrap());
        assert!(service.complete_login("code", &state).await.is_ok());

        let replay = service.complete_login("code", &state).await;
        assert!(matches!(replay.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_failed_exchange_keeps_session_unauthenticated() {
        let mut mock = consent_url_mock();
        mock.expect_exchange_code().times(1).returning(|_, _| {
            Err(AppError::upstream(
                "Token exchange failed",
                serde_json::json!({ "status": 400 }),
            ))
        });

        let service = AuthService::new(Arc::new(mock), Arc::new(SessionStore::new()));

        let state = state_from(&service.begin_login().await.unwrap());
        let result = service.complete_login("bad-code", &state).await;

        assert!(matches!(result.unwrap_err(), AppError::Upstream { .. }));
        assert!(matches!(
            service.credentials().await.unwrap_err(),
            AppError::Unauthorized { .. }
        ));
    }

    #[tokio::test]
    async fn test_credentials_require_login() {
        let service = AuthService::new(
            Arc::new(MockIdentityProvider::new()),
            Arc::new(SessionStore::new()),
        );

        let err = service.credentials().await.unwrap_err();

        assert!(matches!(err, AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_expired_credentials_are_rejected() {
        let session = Arc::new(SessionStore::new());
        session
            .authenticate(credentials(Some(Utc::now() - TimeDelta::minutes(1))))
            .await;

        let service = AuthService::new(Arc::new(MockIdentityProvider::new()), session);

        assert_eq!(service.status().await, SessionStatus::Expired);
        match service.credentials().await.unwrap_err() {
            AppError::Unauthorized { details, .. } => assert_eq!(details["session"], "expired"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
