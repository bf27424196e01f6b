#![allow(dead_code)]

use analytics_relay::config::DEFAULT_ALLOWED_ORIGINS;
use analytics_relay::domain::period::PeriodResolver;
use analytics_relay::domain::providers::{AnalyticsProvider, IdentityProvider, ReportQuery};
use analytics_relay::domain::report::ReportResult;
use analytics_relay::domain::session::{Credentials, SessionStore};
use analytics_relay::error::AppError;
use analytics_relay::routes::app_router;
use analytics_relay::state::AppState;
use async_trait::async_trait;
use axum::Router;
use chrono::{TimeDelta, Utc};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

pub const VALID_CODE: &str = "valid-code";
pub const ACCESS_TOKEN: &str = "ya29.test-token";

/// Identity provider accepting only [`VALID_CODE`].
pub struct FakeIdentity;

#[async_trait]
impl IdentityProvider for FakeIdentity {
    fn authorization_url(&self, state: &str, code_challenge: &str) -> String {
        format!(
            "https://accounts.example.test/auth?state={state}&code_challenge={code_challenge}"
        )
    }

    async fn exchange_code(
        &self,
        code: &str,
        _code_verifier: &str,
    ) -> Result<Credentials, AppError> {
        if code != VALID_CODE {
            return Err(AppError::upstream(
                "Token exchange failed",
                json!({ "upstream_status": 400 }),
            ));
        }

        Ok(test_credentials())
    }
}

/// Analytics provider returning a canned report and recording the last query.
pub struct FakeAnalytics {
    report: Option<Value>,
    last_query: Mutex<Option<ReportQuery>>,
}

impl FakeAnalytics {
    pub fn returning(report: Value) -> Self {
        Self {
            report: Some(report),
            last_query: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            report: None,
            last_query: Mutex::new(None),
        }
    }

    pub fn last_query(&self) -> Option<ReportQuery> {
        self.last_query.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalyticsProvider for FakeAnalytics {
    async fn query_report(
        &self,
        credentials: &Credentials,
        query: &ReportQuery,
    ) -> Result<ReportResult, AppError> {
        *self.last_query.lock().unwrap() = Some(query.clone());

        if credentials.access_token != ACCESS_TOKEN {
            return Err(AppError::unauthorized("Access token rejected", json!({})));
        }

        match &self.report {
            Some(Value::Object(map)) => Ok(map.clone()),
            _ => Err(AppError::upstream(
                "Failed to fetch analytics data",
                json!({ "upstream_status": 500 }),
            )),
        }
    }
}

pub struct TestContext {
    pub state: AppState,
    pub session: Arc<SessionStore>,
    pub analytics: Arc<FakeAnalytics>,
}

pub fn create_test_state(analytics: FakeAnalytics) -> TestContext {
    let session = Arc::new(SessionStore::new());
    let analytics = Arc::new(analytics);

    let state = AppState::new(
        Arc::new(FakeIdentity),
        analytics.clone(),
        session.clone(),
        PeriodResolver::default(),
    );

    TestContext {
        state,
        session,
        analytics,
    }
}

pub fn test_credentials() -> Credentials {
    Credentials {
        access_token: ACCESS_TOKEN.to_string(),
        refresh_token: Some("1//refresh".to_string()),
        expires_at: Some(Utc::now() + TimeDelta::hours(1)),
        scope: None,
        token_type: "Bearer".to_string(),
    }
}

pub async fn authenticate(session: &SessionStore) {
    session.authenticate(test_credentials()).await;
}

pub fn test_router(state: AppState) -> Router {
    let origins: Vec<String> = DEFAULT_ALLOWED_ORIGINS
        .iter()
        .map(|o| o.to_string())
        .collect();
    app_router(state, &origins)
}

pub fn sample_report() -> Value {
    json!({
        "kind": "youtubeAnalytics#resultTable",
        "columnHeaders": [
            { "name": "day", "columnType": "DIMENSION", "dataType": "STRING" },
            { "name": "views", "columnType": "METRIC", "dataType": "INTEGER" }
        ],
        "rows": [["2024-03-08", 5], ["2024-03-09", 7], ["2024-03-10", 0]]
    })
}
