//! Rolling transaction statistics service
//!
//! # Architecture
//! - **core**: Value types (Event, Aggregate)
//! - **store**: WindowStore - bucketed ring over the trailing window
//! - **infrastructure**: Cold path (api, logging, metrics, config)

use std::sync::Arc;
use std::time::Duration;
use txstats::infrastructure::{logging::init_logging, start_server, MetricsCollector};
use txstats::store::WindowStore;
use txstats::{Config, Result};

#[tokio::main]
async fn main() -> Result<()> {
    // Keep guards alive so file appenders flush until shutdown
    let _guards = init_logging();

    // Load config or use defaults
    let config = Config::load().unwrap_or_default();
    tracing::info!(
        window_seconds = config.window.seconds,
        port = config.api.port,
        "Starting transaction statistics service"
    );

    // One store instance coordinates all writers and readers
    let store = Arc::new(WindowStore::with_system_clock(Duration::from_secs(
        config.window.seconds,
    )));
    let metrics = Arc::new(MetricsCollector::new());

    start_server(store, metrics, &config.api).await
}
