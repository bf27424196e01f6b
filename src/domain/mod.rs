//! Domain layer: reporting periods, report aggregation and the operator session.
//!
//! Everything here is independent of HTTP and of the upstream provider.
//!
//! # Architecture
//!
//! - [`period`] - Period tokens and their resolution into date ranges
//! - [`report`] - Report aggregation (`totalViews`)
//! - [`session`] - Operator credentials and login attempts
//! - [`providers`] - Interfaces to the identity and analytics providers
//!
//! # Request Flow
//!
//! 1. A period token is resolved by [`period::PeriodResolver`]
//! 2. The range is sent upstream through [`providers::AnalyticsProvider`]
//! 3. The returned report is augmented by [`report::aggregate`]

pub mod period;
pub mod providers;
pub mod report;
pub mod session;
