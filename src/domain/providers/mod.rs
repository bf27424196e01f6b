//! Traits for the external services the relay talks to.
//!
//! - [`IdentityProvider`] - OAuth2 consent URL and authorization-code exchange
//! - [`AnalyticsProvider`] - Analytics report queries
//!
//! Production implementations live in [`crate::infrastructure::google`];
//! `mockall` mocks are generated for unit tests.

pub mod analytics_provider;
pub mod identity_provider;

pub use analytics_provider::{AnalyticsProvider, ReportQuery};
pub use identity_provider::IdentityProvider;

#[cfg(test)]
pub use analytics_provider::MockAnalyticsProvider;
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
