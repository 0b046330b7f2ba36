//! Windowed aggregation store
//!
//! Fixed ring of per-second buckets spanning the trailing window. Each bucket
//! holds the aggregate for exactly one calendar second, identified by
//! `timestamp mod N`. A bucket's span is validated on every write (a slot the
//! ring has wrapped past is reset before the new event is folded in); stale
//! spans are filtered out at read time rather than swept by a background
//! task. Writes are O(1), reads O(N) with N fixed at the window length.

pub mod clock;

pub use clock::{Clock, SystemClock};

use crate::core::{Aggregate, Event};
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;

/// Span sentinel for a bucket that has never been written
const EMPTY_SPAN_MS: i64 = -1;

/// One ring slot: the aggregate for a single calendar second
#[derive(Debug, Clone, Copy)]
struct Bucket {
    aggregate: Aggregate,
    /// Lower bound of the second this slot currently represents,
    /// in milliseconds; EMPTY_SPAN_MS when unassigned
    span_start_ms: i64,
}

impl Bucket {
    const fn empty() -> Self {
        Self {
            aggregate: Aggregate::empty(),
            span_start_ms: EMPTY_SPAN_MS,
        }
    }
}

/// Rolling statistics over a fixed trailing time window
///
/// One instance coordinates all writers and readers of a stream; handlers
/// share it behind an `Arc`. All mutation is serialized by an internal lock:
/// `record` holds the write half for the whole check-reset-fold sequence,
/// `snapshot` holds the read half for the whole scan-and-combine, so no
/// torn bucket state is ever observed.
pub struct WindowStore {
    buckets: RwLock<Vec<Bucket>>,
    window_ms: i64,
    clock: Arc<dyn Clock>,
}

impl WindowStore {
    /// Create a store covering the given trailing window
    ///
    /// The bucket count equals the window length in whole seconds; windows
    /// shorter than one second are rounded up to a single bucket.
    pub fn new(window: Duration, clock: Arc<dyn Clock>) -> Self {
        let seconds = window.as_secs().max(1) as usize;
        Self {
            buckets: RwLock::new(vec![Bucket::empty(); seconds]),
            window_ms: (seconds as i64) * 1000,
            clock,
        }
    }

    /// Create a store driven by the system wall clock
    pub fn with_system_clock(window: Duration) -> Self {
        Self::new(window, Arc::new(SystemClock))
    }

    /// Window length in milliseconds
    #[inline]
    pub fn window_ms(&self) -> i64 {
        self.window_ms
    }

    /// Record one event
    ///
    /// Events older than the window or dated after the store's clock are
    /// silently discarded; both are normal cases, not errors. The boundary
    /// is strict: `timestamp > now` drops, `timestamp == now` records.
    pub fn record(&self, event: Event) {
        let now = self.clock.now_millis();

        if self.should_discard(&event, now) {
            tracing::debug!(
                target: "store",
                timestamp_ms = event.timestamp_ms,
                now_ms = now,
                "discarding out-of-window event"
            );
            return;
        }

        let span_start_ms = event.floored_second_ms();
        let mut buckets = self.buckets.write();
        let index = bucket_index(event.timestamp_ms, buckets.len());
        let bucket = &mut buckets[index];

        // Never trust the slot: the ring wraps, so a bucket last written a
        // full window ago still holds the aggregate of a different second.
        if bucket.span_start_ms != span_start_ms {
            bucket.aggregate = Aggregate::empty();
            bucket.span_start_ms = span_start_ms;
        }

        bucket.aggregate = bucket.aggregate.incorporate(&event);
    }

    /// Compute the aggregate over the current window
    ///
    /// The clock is read exactly once so the freshness cutoff is consistent
    /// across the full scan. Buckets qualify by the span they record, not by
    /// array position; slots that simply have not been written to recently
    /// are excluded here instead of being purged on the write path.
    pub fn snapshot(&self) -> Aggregate {
        let now = self.clock.now_millis();
        let window_start = now - self.window_ms;

        let buckets = self.buckets.read();
        Aggregate::combine(
            buckets
                .iter()
                .filter(|b| b.span_start_ms >= window_start)
                .map(|b| &b.aggregate),
        )
    }

    #[inline]
    fn should_discard(&self, event: &Event, now: i64) -> bool {
        now - event.timestamp_ms > self.window_ms || event.timestamp_ms > now
    }
}

/// Ring slot for a timestamp: second index modulo bucket count
#[inline]
fn bucket_index(timestamp_ms: i64, bucket_count: usize) -> usize {
    timestamp_ms
        .div_euclid(1000)
        .rem_euclid(bucket_count as i64) as usize
}
