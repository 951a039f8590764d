//! Per-function call statistics
//!
//! Each tracked identifier owns one [`FunctionStats`] bucket. Buckets are
//! only ever updated after a call returns successfully, so a bucket's
//! average is always consistent with its call count and accumulated time.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Statistics for a single tracked function
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionStats {
    /// Number of successful calls
    pub calls: u64,
    /// Accumulated execution time (seconds)
    pub total_time: f64,
    /// `total_time / calls`, or 0.0 before the first call
    pub avg_time: f64,
}

impl FunctionStats {
    /// Create an empty bucket
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one successful call that took `elapsed`
    pub fn record(&mut self, elapsed: Duration) {
        self.record_secs(elapsed.as_secs_f64());
    }

    /// Record one successful call that took `elapsed_secs` seconds
    ///
    /// Negative inputs are clamped to zero.
    pub fn record_secs(&mut self, elapsed_secs: f64) {
        self.calls += 1;
        self.total_time += elapsed_secs.max(0.0);
        self.refresh_average();
    }

    /// Fold another bucket for the same identifier into this one
    pub fn absorb(&mut self, other: &FunctionStats) {
        let mut other = other.clone();
        other.normalize();
        self.calls += other.calls;
        self.total_time += other.total_time;
        self.refresh_average();
    }

    /// Restore the bucket invariants after deserialization
    ///
    /// `total_time` is clamped to >= 0 (and to 0 when there were no calls),
    /// then `avg_time` is recomputed from it.
    pub(crate) fn normalize(&mut self) {
        if self.calls == 0 || !self.total_time.is_finite() || self.total_time < 0.0 {
            self.total_time = 0.0;
        }
        self.refresh_average();
    }

    fn refresh_average(&mut self) {
        self.avg_time = if self.calls > 0 {
            self.total_time / self.calls as f64
        } else {
            0.0
        };
    }
}
