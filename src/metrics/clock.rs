//! CLOCK Map Metrics
//!
//! Metrics for [`ClockMap`](crate::ClockMap). Besides the core counters the
//! map reports how far the clock hand travelled and how many second chances it
//! took away, which shows how hot the working set is: a hand that clears many
//! bits per eviction is sweeping over recently used entries.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// Metrics for a CLOCK map
#[derive(Debug, Default, Clone)]
pub struct ClockCacheMetrics {
    /// Core metrics common to all caches
    pub core: CoreCacheMetrics,

    /// Slots the clock hand visited while looking for a victim
    pub hand_steps: u64,

    /// Second-chance bits cleared by the hand
    pub second_chances_revoked: u64,
}

impl ClockCacheMetrics {
    /// Creates an empty set of counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts the metrics to a BTreeMap for reporting
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("hand_steps".to_string(), self.hand_steps as f64);
        metrics.insert(
            "second_chances_revoked".to_string(),
            self.second_chances_revoked as f64,
        );
        if self.core.evictions > 0 {
            metrics.insert(
                "avg_steps_per_eviction".to_string(),
                self.hand_steps as f64 / self.core.evictions as f64,
            );
        }
        metrics
    }
}

impl CacheMetrics for ClockCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "CLOCK"
    }
}
