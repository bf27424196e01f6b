//! Browser-facing OAuth pages.
//!
//! The operator opens `/login` in a browser once; Google sends the browser
//! back to `/oauth2callback`, which renders an HTML result page with Askama.
//!
//! # Modules
//!
//! - [`handlers`] - Login redirect and callback handlers
//! - [`routes`] - Route configuration

pub mod handlers;
pub mod routes;
