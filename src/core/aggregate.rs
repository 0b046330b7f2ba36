//! Combinable summary statistics
//!
//! Aggregate is an immutable value: incorporating an event or combining a set
//! of aggregates always produces a new value. The mean is maintained
//! incrementally (Welford) rather than recomputed from sum/count on every
//! fold, and combine() derives the final mean once from the accumulated
//! totals rather than averaging the inputs' means.

use super::Event;

/// Summary statistics for a set of events
///
/// The empty aggregate carries `max = -inf` / `min = +inf` so that extrema
/// fold as identities; it is the combine() result only when no input holds
/// any events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    pub sum: f64,
    pub mean: f64,
    pub max: f64,
    pub min: f64,
    pub count: u64,
}

impl Aggregate {
    /// The empty aggregate (identity for combine)
    #[inline(always)]
    pub const fn empty() -> Self {
        Self {
            sum: 0.0,
            mean: 0.0,
            max: f64::NEG_INFINITY,
            min: f64::INFINITY,
            count: 0,
        }
    }

    /// Whether any event has been folded in
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Fold one event into this aggregate, producing a new value
    ///
    /// Total on all float inputs; NaN and infinities propagate per IEEE
    /// semantics.
    #[inline]
    pub fn incorporate(&self, event: &Event) -> Self {
        let amount = event.amount;
        let count = self.count + 1;
        let mean = self.mean + (amount - self.mean) / count as f64;

        Self {
            sum: self.sum + amount,
            mean,
            max: self.max.max(amount),
            min: self.min.min(amount),
            count,
        }
    }

    /// Combine any number of aggregates into one
    ///
    /// Sum and count accumulate additively, extrema take the running
    /// min/max. The mean is computed once from the totals; averaging the
    /// inputs' means would compound rounding error. Empty inputs contribute
    /// nothing. Floating-point order sensitivity of the sum is accepted.
    pub fn combine<'a, I>(aggregates: I) -> Self
    where
        I: IntoIterator<Item = &'a Aggregate>,
    {
        let mut total_sum = 0.0;
        let mut total_count = 0u64;
        let mut total_max = f64::NEG_INFINITY;
        let mut total_min = f64::INFINITY;

        for aggregate in aggregates {
            total_sum += aggregate.sum;
            total_count += aggregate.count;
            total_max = total_max.max(aggregate.max);
            total_min = total_min.min(aggregate.min);
        }

        if total_count == 0 {
            return Self::empty();
        }

        Self {
            sum: total_sum,
            mean: total_sum / total_count as f64,
            max: total_max,
            min: total_min,
            count: total_count,
        }
    }
}

impl Default for Aggregate {
    fn default() -> Self {
        Self::empty()
    }
}
