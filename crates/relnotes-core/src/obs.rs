//! Structured observability hooks for store loading and feature queries.
//!
//! This module provides:
//! - Query-scoped tracing spans via the `QuerySpan` RAII guard
//! - Emission functions for key lifecycle events: store loaded, query
//!   resolved, query failed
//!
//! Events are emitted at `info!` level (configurable via `RUST_LOG`).

use tracing::info;

/// RAII guard that enters a query-scoped tracing span.
///
/// # Example
///
/// ```ignore
/// let _span = QuerySpan::enter("1.22", Some("net/http"));
/// // Every tracing call now carries target_version and library.
/// ```
pub struct QuerySpan {
    _span: tracing::span::EnteredSpan,
}

impl QuerySpan {
    /// Create and enter a span tagged with the query parameters.
    pub fn enter(target_version: &str, library: Option<&str>) -> Self {
        let span = tracing::info_span!(
            "relnotes.query",
            target_version = %target_version,
            library = library.unwrap_or(""),
        );
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: release store built.
pub fn emit_store_loaded(origin: &str, releases: usize, oldest: &str, latest: &str) {
    info!(
        event = "store.loaded",
        origin = %origin,
        releases = releases,
        oldest = %oldest,
        latest = %latest,
    );
}

/// Emit event: query aggregated successfully.
pub fn emit_query_resolved(from_version: &str, to_version: &str, changes: usize, libraries: usize) {
    info!(
        event = "query.resolved",
        from_version = %from_version,
        to_version = %to_version,
        changes = changes,
        libraries = libraries,
    );
}

/// Emit event: query failed (warning level).
pub fn emit_query_failed(target_version: &str, error: &dyn std::fmt::Display) {
    tracing::warn!(event = "query.failed", target_version = %target_version, error = %error);
}
