//! DTOs for the analytics endpoint.

use serde::Deserialize;
use serde_json::json;

use crate::domain::period::PeriodToken;
use crate::error::AppError;

/// Query parameters of `GET /get-analytics`.
#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    #[serde(default)]
    pub period: Option<String>,
}

impl AnalyticsQuery {
    /// Returns the requested period.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `period` is missing or blank.
    pub fn period(&self) -> Result<PeriodToken, AppError> {
        match self.period.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Ok(PeriodToken::from(raw)),
            _ => Err(AppError::bad_request(
                "Period parameter is required (e.g., ?period=7d).",
                json!({ "allowed": ["24h", "48h", "7d", "30d"] }),
            )),
        }
    }
}
