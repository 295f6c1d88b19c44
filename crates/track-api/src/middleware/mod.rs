//! # HTTP Middleware
//!
//! - [`metrics`] — in-process request, error and commit counters.

pub mod metrics;
