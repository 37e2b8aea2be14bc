//! relnotes Core Library
//!
//! Answers "which features are available in my project's version?" over a
//! fixed corpus of release notes. Releases are ordered by dotted numeric
//! version, the range up to a target version is merged into an
//! [`AggregationResult`], and the result is rendered as a reproducible text
//! report.

pub mod aggregate;
pub mod domain;
pub mod loader;
pub mod metrics;
pub mod obs;
pub mod report;
pub mod service;
pub mod store;
pub mod telemetry;
pub mod version;

pub use aggregate::{aggregate_up_to, AggregationResult, LibraryChanges};
pub use domain::{
    Category, Change, ErrorKind, FeatureError, Impact, LibraryChange, LoadError, Release, Result,
};
pub use loader::{parse_release, DirectorySource, EmbeddedCorpus, ReleaseSource};
pub use metrics::METRICS;
pub use obs::{emit_query_failed, emit_query_resolved, emit_store_loaded, QuerySpan};
pub use report::{render_report, CLOSING_NOTE};
pub use service::FeatureService;
pub use store::ReleaseStore;
pub use telemetry::init_tracing;
pub use version::{compare_versions, is_well_formed, sort_ascending};

/// relnotes version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
