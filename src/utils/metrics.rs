use std::collections::HashMap;
use std::sync::Arc;
use parking_lot::Mutex;

pub const VOTES_ACCEPTED: &str = "votes_accepted";
pub const VOTES_REJECTED: &str = "votes_rejected";
pub const BLOCKS_SEALED: &str = "blocks_sealed";
pub const VALIDATORS_REMAINING: &str = "validators_remaining";

/// Metrics registry (simple, Prometheus-style).
///
/// One registry per voting session; clones share the same counters.
#[derive(Clone, Default)]
pub struct MetricsRegistry {
    counters: Arc<Mutex<HashMap<String, u64>>>,
    gauges: Arc<Mutex<HashMap<String, f64>>>,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc_counter(&self, name: &str) {
        let mut counters = self.counters.lock();
        *counters.entry(name.to_string()).or_insert(0) += 1;
    }

    pub fn set_gauge(&self, name: &str, val: f64) {
        self.gauges.lock().insert(name.to_string(), val);
    }

    pub fn counter(&self, name: &str) -> u64 {
        self.counters.lock().get(name).copied().unwrap_or(0)
    }

    pub fn gauge(&self, name: &str) -> Option<f64> {
        self.gauges.lock().get(name).copied()
    }
}
