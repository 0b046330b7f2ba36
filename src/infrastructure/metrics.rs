//! Metrics collection for system monitoring
//!
//! Lock-free counters using atomic operations, updated from request handlers
//! and exported via the health endpoint.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Instant, SystemTime};

/// Service metrics collector
///
/// Thread-safe counters with relaxed ordering; snapshots taken for export.
pub struct MetricsCollector {
    /// Total transactions accepted over HTTP (before any discard decision)
    transactions_received: AtomicU64,
    /// Total statistics reads served
    statistics_served: AtomicU64,
    /// Last transaction arrival (Unix millis)
    last_transaction_time: AtomicU64,
    /// Start time for uptime calculation
    start_time: Instant,
}

/// Metrics snapshot for export
#[derive(Debug, Clone, Copy)]
pub struct MetricsSnapshot {
    pub transactions_received: u64,
    pub statistics_served: u64,
    pub transaction_rate: f64, // transactions per second since start
    pub uptime_seconds: u64,
}

impl MetricsCollector {
    /// Create new metrics collector
    pub fn new() -> Self {
        Self {
            transactions_received: AtomicU64::new(0),
            statistics_served: AtomicU64::new(0),
            last_transaction_time: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record an incoming transaction
    #[inline]
    pub fn record_transaction(&self) {
        self.transactions_received.fetch_add(1, Ordering::Relaxed);
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        self.last_transaction_time.store(now, Ordering::Relaxed);
    }

    /// Record a served statistics read
    #[inline]
    pub fn record_statistics_read(&self) {
        self.statistics_served.fetch_add(1, Ordering::Relaxed);
    }

    /// Milliseconds since the last transaction, or None before the first
    pub fn millis_since_last_transaction(&self) -> Option<u64> {
        let last = self.last_transaction_time.load(Ordering::Relaxed);
        if last == 0 {
            return None;
        }

        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        Some(now.saturating_sub(last))
    }

    /// Get current snapshot of metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        let received = self.transactions_received.load(Ordering::Relaxed);
        let served = self.statistics_served.load(Ordering::Relaxed);

        let uptime = self.start_time.elapsed().as_secs();
        let rate = if uptime > 0 {
            received as f64 / uptime as f64
        } else {
            0.0
        };

        MetricsSnapshot {
            transactions_received: received,
            statistics_served: served,
            transaction_rate: rate,
            uptime_seconds: uptime,
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}
