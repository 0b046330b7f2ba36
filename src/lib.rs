//! Rolling transaction statistics service
//!
//! Core library for windowed aggregation over a trailing 60-second window.

pub mod core;
pub mod infrastructure;
pub mod store;

// Re-export commonly used types
pub use crate::core::{Aggregate, Event};
pub use crate::infrastructure::config::{ApiConfig, Config, WindowConfig};
pub use crate::store::WindowStore;

use thiserror::Error;

/// Main error type for the statistics service
#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, StatsError>;
