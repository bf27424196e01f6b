//! Operator session: OAuth credentials and in-flight login attempts.
//!
//! The relay serves a single operator. The session starts
//! [`SessionState::Unauthenticated`], becomes authenticated when a login
//! completes, and is required by every upstream call.

use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use std::fmt;
use tokio::sync::{Mutex, RwLock};

/// How long a login started via `/login` may take to come back.
pub const PENDING_LOGIN_TTL_MINUTES: i64 = 10;

/// Most login attempts awaiting a callback at once; the oldest is evicted.
pub const MAX_PENDING_LOGINS: usize = 16;

/// OAuth credentials granted to the operator.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub scope: Option<String>,
    pub token_type: String,
}

impl Credentials {
    /// Returns true once `expires_at` has passed. Credentials without an
    /// expiry never expire.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

// Tokens must never reach the logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"***")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "***"),
            )
            .field("expires_at", &self.expires_at)
            .field("scope", &self.scope)
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// Authentication state of the operator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticated(Credentials),
}

/// Coarse session status reported by the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Unauthenticated,
    Authenticated,
    Expired,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Authenticated => "authenticated",
            Self::Expired => "expired",
        }
    }
}

impl SessionState {
    /// Usable credentials at `now`, if any.
    pub fn credentials_at(&self, now: DateTime<Utc>) -> Option<&Credentials> {
        match self {
            Self::Authenticated(credentials) if !credentials.is_expired(now) => Some(credentials),
            _ => None,
        }
    }

    pub fn status_at(&self, now: DateTime<Utc>) -> SessionStatus {
        match self {
            Self::Unauthenticated => SessionStatus::Unauthenticated,
            Self::Authenticated(credentials) if credentials.is_expired(now) => {
                SessionStatus::Expired
            }
            Self::Authenticated(_) => SessionStatus::Authenticated,
        }
    }
}

/// A login redirect awaiting its callback.
///
/// `state` is echoed back by the provider and identifies the attempt;
/// `code_verifier` is the PKCE secret sent with the code exchange.
#[derive(Debug, Clone)]
pub struct PendingLogin {
    pub state: String,
    pub code_verifier: String,
    pub created_at: DateTime<Utc>,
}

impl PendingLogin {
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at >= TimeDelta::minutes(PENDING_LOGIN_TTL_MINUTES)
    }
}

/// Shared session holder, owned by the application state.
#[derive(Debug, Default)]
pub struct SessionStore {
    state: RwLock<SessionState>,
    pending: Mutex<HashMap<String, PendingLogin>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a login attempt, dropping attempts that went stale and the
    /// oldest ones beyond [`MAX_PENDING_LOGINS`].
    pub async fn begin_login(&self, login: PendingLogin) {
        let mut pending = self.pending.lock().await;
        let now = login.created_at;
        pending.retain(|_, existing| !existing.is_stale(now));

        while pending.len() >= MAX_PENDING_LOGINS {
            let Some(oldest) = pending
                .values()
                .min_by_key(|existing| existing.created_at)
                .map(|existing| existing.state.clone())
            else {
                break;
            };
            pending.remove(&oldest);
        }

        pending.insert(login.state.clone(), login);
    }

    /// Removes and returns the attempt identified by `state` if it is still fresh.
    pub async fn take_pending(&self, state: &str, now: DateTime<Utc>) -> Option<PendingLogin> {
        let mut pending = self.pending.lock().await;
        pending
            .remove(state)
            .filter(|login| !login.is_stale(now))
    }

    /// Stores freshly granted credentials, replacing any previous ones.
    pub async fn authenticate(&self, credentials: Credentials) {
        *self.state.write().await = SessionState::Authenticated(credentials);
    }

    pub async fn status_at(&self, now: DateTime<Utc>) -> SessionStatus {
        self.state.read().await.status_at(now)
    }

    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }
}
