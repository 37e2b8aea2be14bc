//! Query outcome counters.
//!
//! Every `FeatureService` query lands in exactly one bucket: served, or
//! failed under its [`ErrorKind`]. Call [`Metrics::flush`] to emit the
//! current values as a single `tracing::info!` event (e.g. when a binary
//! exits).

use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::ErrorKind;

/// Global metrics singleton.
pub static METRICS: Metrics = Metrics::new();

pub struct Metrics {
    queries_served: AtomicU64,
    reports_rendered: AtomicU64,
    /// One counter per [`ErrorKind`], indexed by [`slot`].
    queries_failed: [AtomicU64; 3],
}

fn slot(kind: ErrorKind) -> usize {
    match kind {
        ErrorKind::Validation => 0,
        ErrorKind::NotFound => 1,
        ErrorKind::Internal => 2,
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub const fn new() -> Self {
        Self {
            queries_served: AtomicU64::new(0),
            reports_rendered: AtomicU64::new(0),
            queries_failed: [AtomicU64::new(0), AtomicU64::new(0), AtomicU64::new(0)],
        }
    }

    pub fn inc_queries_served(&self) {
        self.queries_served.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a failed query under the caller-facing class of its error.
    pub fn inc_queries_failed(&self, kind: ErrorKind) {
        self.queries_failed[slot(kind)].fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "queries_failed", kind = ?kind, "counter incremented");
    }

    pub fn inc_reports_rendered(&self) {
        self.reports_rendered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn queries_served(&self) -> u64 {
        self.queries_served.load(Ordering::Relaxed)
    }

    pub fn queries_failed(&self, kind: ErrorKind) -> u64 {
        self.queries_failed[slot(kind)].load(Ordering::Relaxed)
    }

    /// Failed queries across every error kind.
    pub fn total_failed(&self) -> u64 {
        self.queries_failed
            .iter()
            .map(|c| c.load(Ordering::Relaxed))
            .sum()
    }

    pub fn reports_rendered(&self) -> u64 {
        self.reports_rendered.load(Ordering::Relaxed)
    }

    /// Emit all current counter values as a single `info!` event.
    pub fn flush(&self) {
        tracing::info!(
            metric = "flush",
            queries_served = self.queries_served(),
            failed_validation = self.queries_failed(ErrorKind::Validation),
            failed_not_found = self.queries_failed(ErrorKind::NotFound),
            failed_internal = self.queries_failed(ErrorKind::Internal),
            reports_rendered = self.reports_rendered(),
        );
    }
}
