//! Usage metrics — per-job measurements and process-lifetime running totals.
//!
//! One `MetricsAggregator` instance per namespace (enrichment, single-job
//! summarize, cover letter), owned by whoever needs it and injected — never
//! ambient process-wide state. Increments are commutative, so any
//! serialization order is fine; the lock only guarantees none are lost.

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cost and runtime of a single generation call. Cache hits reuse the stored
/// value; failed generations report zeros.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerJobMetrics {
    /// Wall-clock provider runtime in milliseconds.
    pub runtime: u64,
    pub tokens_used: u64,
    pub cost: f64,
}

/// Running totals across the process lifetime, until reset.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalMetrics {
    /// Cumulative provider runtime in milliseconds.
    pub total_runtime: u64,
    pub total_tokens: u64,
    pub total_cost: f64,
    pub request_count: u64,
    /// Completion time of the last search operation or reset.
    pub last_refresh_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
pub struct MetricsAggregator {
    inner: Mutex<GlobalMetrics>,
}

impl MetricsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    // A task that panicked while holding the lock must not wedge the
    // metrics path for everyone else.
    fn lock(&self) -> MutexGuard<'_, GlobalMetrics> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Adds a completed generation to all running totals.
    pub fn record_success(&self, runtime_ms: u64, tokens: u64, cost: f64) {
        let mut metrics = self.lock();
        metrics.total_runtime += runtime_ms;
        metrics.total_tokens += tokens;
        metrics.total_cost += cost;
        metrics.request_count += 1;
    }

    /// A cache hit still counts as a request, but contributes no
    /// runtime/tokens/cost.
    pub fn record_cache_hit(&self) {
        self.lock().request_count += 1;
    }

    /// A failed generation counts as a request; its per-job metrics are
    /// zeroed by the caller.
    pub fn record_failure(&self) {
        self.lock().request_count += 1;
    }

    /// Stamps the completion time of a finished search operation.
    pub fn mark_refreshed(&self, at: DateTime<Utc>) {
        self.lock().last_refresh_time = Some(at);
    }

    /// Zeroes every numeric field and stamps the reset time. Returns the
    /// post-reset state.
    pub fn reset(&self) -> GlobalMetrics {
        let mut metrics = self.lock();
        *metrics = GlobalMetrics {
            last_refresh_time: Some(Utc::now()),
            ..GlobalMetrics::default()
        };
        metrics.clone()
    }

    /// Read-only copy of the current totals.
    pub fn snapshot(&self) -> GlobalMetrics {
        self.lock().clone()
    }
}
