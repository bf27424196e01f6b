//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AnalyticsService, AuthService};
use crate::domain::period::PeriodResolver;
use crate::domain::providers::{AnalyticsProvider, IdentityProvider};
use crate::domain::session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService<dyn IdentityProvider>>,
    pub analytics_service: Arc<AnalyticsService<dyn AnalyticsProvider>>,
}

impl AppState {
    /// Wires the services around one operator session.
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        analytics: Arc<dyn AnalyticsProvider>,
        session: Arc<SessionStore>,
        resolver: PeriodResolver,
    ) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(identity, session)),
            analytics_service: Arc::new(AnalyticsService::new(analytics, resolver)),
        }
    }
}
