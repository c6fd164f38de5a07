//! Engine counters: translation outcomes, dictionary lookups, load results.
//! Counters only; no timings are recorded on the per-line hot path.

use std::collections::HashMap;

use parking_lot::Mutex;

/// Monotonic counters for all named metrics.
pub struct MetricsRegistry {
    counters: Mutex<HashMap<&'static str, u64>>,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self {
            counters: Mutex::new(HashMap::new()),
        }
    }

    /// Increment the named counter.
    pub fn incr(&self, name: &'static str) {
        let mut counters = self.counters.lock();
        *counters.entry(name).or_insert(0) += 1;
    }

    /// Current value of a counter (0 if never incremented).
    pub fn get(&self, name: &str) -> u64 {
        self.counters.lock().get(name).copied().unwrap_or(0)
    }

    /// Snapshot of every counter, for host-side introspection.
    pub fn summary(&self) -> HashMap<String, u64> {
        self.counters
            .lock()
            .iter()
            .map(|(&name, &value)| (name.to_string(), value))
            .collect()
    }
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Well-known counter names (constants to avoid typos).
pub mod counter_names {
    pub const LINES_TRANSLATED: &str = "lines_translated";
    pub const LINES_PASSED: &str = "lines_passed_through";
    pub const DICT_KNOWN_GAPS: &str = "dict_known_gaps";
    pub const DICT_MISSES: &str = "dict_misses";
    pub const REPORTS_SENT: &str = "reports_sent";
    pub const REPORTS_DROPPED: &str = "reports_dropped";
    pub const LOADS_SUCCEEDED: &str = "loads_succeeded";
    pub const LOADS_FAILED: &str = "loads_failed";
    pub const CACHE_HITS: &str = "cache_hits";
    pub const CACHE_WRITE_FAILURES: &str = "cache_write_failures";
    pub const DOCS_TRANSLATED: &str = "docs_translated";
    pub const DOCS_PASSED_THROUGH: &str = "docs_passed_through";
}
