//! Version-scoped feature aggregation.
//!
//! [`aggregate_up_to`] resolves every release from the oldest tracked version
//! through a target version and merges their change records into an
//! [`AggregationResult`]. The store is only read; the result owns clones of
//! everything it references.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::error::{FeatureError, Result};
use crate::domain::release::{Change, LibraryChange};
use crate::store::ReleaseStore;
use crate::version::sort_ascending;

/// Library name to its changes.
pub type LibraryChanges = BTreeMap<String, Vec<LibraryChange>>;

/// Features available in a version range.
///
/// `changes_by_version` and `library_changes_by_version` always hold one
/// entry for every release in range, even when that entry is empty. Their
/// iteration order is meaningless; use [`AggregationResult::versions`] for
/// chronological traversal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    pub from_version: String,
    pub to_version: String,
    pub summary: String,

    /// General changes across the range, oldest release first.
    pub changes: Vec<Change>,

    /// Per library, its changes across the range, oldest release first.
    /// Libraries without any change in range are not listed.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub library_info: LibraryChanges,

    #[serde(skip)]
    pub changes_by_version: HashMap<String, Vec<Change>>,

    #[serde(skip)]
    pub library_changes_by_version: HashMap<String, LibraryChanges>,
}

impl AggregationResult {
    /// Versions present in the result, oldest first.
    pub fn versions(&self) -> Vec<&str> {
        let mut versions: Vec<&str> = self.changes_by_version.keys().map(String::as_str).collect();
        sort_ascending(&mut versions);
        versions
    }

    /// True when the range carries no general and no library changes.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.library_info.is_empty()
    }

    /// Number of distinct libraries with at least one change in range.
    pub fn library_count(&self) -> usize {
        self.library_info.len()
    }
}

/// Aggregate every release up to and including `target_version`.
///
/// `library` restricts library changes to one library; `None` or an empty
/// string means no filter.
pub fn aggregate_up_to(
    store: &ReleaseStore,
    target_version: &str,
    library: Option<&str>,
) -> Result<AggregationResult> {
    const OP: &str = "aggregate_up_to";

    if target_version.is_empty() {
        return Err(FeatureError::validation(OP, "target version cannot be empty"));
    }
    let library = library.filter(|lib| !lib.is_empty());

    let releases = store.up_to(target_version)?;
    if releases.is_empty() {
        return Err(FeatureError::not_found(OP, target_version));
    }
    let from_version = store.oldest_version()?.to_string();

    let mut changes_by_version = HashMap::with_capacity(releases.len());
    let mut library_changes_by_version = HashMap::with_capacity(releases.len());
    let mut changes = Vec::new();
    let mut library_info = LibraryChanges::new();

    for release in &releases {
        changes_by_version.insert(release.version.clone(), release.general_changes.clone());
        changes.extend(release.general_changes.iter().cloned());

        let selected: LibraryChanges = match library {
            Some(lib) => release
                .library_changes
                .get_key_value(lib)
                .map(|(name, entries)| (name.clone(), entries.clone()))
                .into_iter()
                .collect(),
            None => release.library_changes.clone(),
        };

        for (name, entries) in &selected {
            if !entries.is_empty() {
                library_info
                    .entry(name.clone())
                    .or_default()
                    .extend(entries.iter().cloned());
            }
        }
        library_changes_by_version.insert(release.version.clone(), selected);
    }

    let mut result = AggregationResult {
        from_version,
        to_version: target_version.to_string(),
        summary: String::new(),
        changes,
        library_info,
        changes_by_version,
        library_changes_by_version,
    };
    result.summary = summarize(&result, target_version, library);
    Ok(result)
}

fn summarize(result: &AggregationResult, target_version: &str, library: Option<&str>) -> String {
    let from = &result.from_version;
    match library {
        Some(lib) if result.library_count() > 0 => format!(
            "Features available for library '{lib}' in your {target_version} project (from {from})"
        ),
        Some(lib) => format!("No features found for library '{lib}' in your {target_version} project"),
        None if result.is_empty() => {
            format!("No features found in your {target_version} project")
        }
        None => format!(
            "All features available in your project ({target_version}): {} changes across {} libraries from {from}",
            result.changes.len(),
            result.library_count()
        ),
    }
}
