//! Infrastructure - cold path only
//!
//! This module contains non-latency-critical code:
//! - API server
//! - Logging and metrics
//! - Configuration management

pub mod api;
pub mod config;
pub mod logging;
pub mod metrics;

pub use api::{start_server, AppState};
pub use metrics::MetricsCollector;
