//! Infrastructure layer for external integrations.
//!
//! This layer implements the provider interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`google`] - Google OAuth2 and YouTube Analytics HTTP clients
//! - [`http`] - Shared outbound HTTP client construction

pub mod google;
pub mod http;
