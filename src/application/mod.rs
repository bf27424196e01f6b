//! Application layer services implementing the relay's use cases.
//!
//! Services coordinate the domain types with the provider traits and are the
//! only API the HTTP handlers call.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Operator login and session access
//! - [`services::analytics_service::AnalyticsService`] - Period-based view reports

pub mod services;
