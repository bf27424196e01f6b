//! HTTP request handlers for API endpoints.

pub mod analytics;
pub mod health;

pub use analytics::analytics_handler;
pub use health::health_handler;
