use std::sync::Arc;

use crate::aggregate::{aggregate_up_to, AggregationResult};
use crate::domain::error::Result;
use crate::domain::release::Release;
use crate::loader::ReleaseSource;
use crate::metrics::METRICS;
use crate::obs::{emit_query_failed, emit_query_resolved, emit_store_loaded, QuerySpan};
use crate::report::render_report;
use crate::store::ReleaseStore;

/// Thin API layer over a shared, immutable release store.
///
/// Cloning is cheap; every clone reads the same store.
#[derive(Debug, Clone)]
pub struct FeatureService {
    store: Arc<ReleaseStore>,
}

impl FeatureService {
    pub fn new(store: Arc<ReleaseStore>) -> Self {
        Self { store }
    }

    /// Build the store from `source` and wrap it. Fails if any record is bad.
    pub fn from_source(source: &impl ReleaseSource) -> Result<Self> {
        let store = ReleaseStore::load(source)?;
        emit_store_loaded(
            &source.describe(),
            store.len(),
            store.oldest_version()?,
            store.latest_version()?,
        );
        Ok(Self::new(Arc::new(store)))
    }

    pub fn store(&self) -> &ReleaseStore {
        &self.store
    }

    /// Features available from the oldest tracked release up to `target_version`.
    pub fn features_for_version(
        &self,
        target_version: &str,
        library: Option<&str>,
    ) -> Result<AggregationResult> {
        let _span = QuerySpan::enter(target_version, library);

        match aggregate_up_to(&self.store, target_version, library) {
            Ok(result) => {
                METRICS.inc_queries_served();
                emit_query_resolved(
                    &result.from_version,
                    &result.to_version,
                    result.changes.len(),
                    result.library_count(),
                );
                Ok(result)
            }
            Err(e) => {
                METRICS.inc_queries_failed(e.kind());
                emit_query_failed(target_version, &e);
                Err(e)
            }
        }
    }

    pub fn render(
        &self,
        result: &AggregationResult,
        target_version: &str,
        library: Option<&str>,
    ) -> String {
        METRICS.inc_reports_rendered();
        render_report(result, target_version, library)
    }

    /// All tracked versions, newest first.
    pub fn versions(&self) -> Vec<&str> {
        self.store.versions()
    }

    pub fn latest_version(&self) -> Result<&str> {
        self.store.latest_version()
    }

    pub fn release(&self, version: &str) -> Result<&Release> {
        self.store.get(version)
    }
}
