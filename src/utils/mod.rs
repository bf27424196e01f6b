//! Utility functions shared across layers.
//!
//! - [`pkce`] - OAuth `state` values and PKCE verifier/challenge pairs
//! - [`secrets`] - Masking of secrets for log output

pub mod pkce;
pub mod secrets;
