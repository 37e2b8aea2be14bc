//! Immutable in-memory release store.
//!
//! Built once from a validated set of releases and shared read-only
//! afterwards. Construction is all or nothing: an empty set or a duplicate
//! version rejects the whole input.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::domain::error::{FeatureError, LoadError, Result};
use crate::domain::release::Release;
use crate::loader::ReleaseSource;
use crate::version::compare_versions;

/// Queryable collection of releases, kept newest first.
#[derive(Debug, Clone)]
pub struct ReleaseStore {
    releases: Vec<Release>,
}

impl ReleaseStore {
    /// Build a store from release records.
    pub fn new(mut releases: Vec<Release>) -> Result<Self> {
        if releases.is_empty() {
            return Err(LoadError::Empty {
                origin: "release set".to_string(),
            }
            .into());
        }

        let mut seen = HashSet::with_capacity(releases.len());
        for release in &releases {
            if !seen.insert(release.version.as_str()) {
                return Err(LoadError::DuplicateVersion {
                    version: release.version.clone(),
                }
                .into());
            }
        }

        releases.sort_by(|a, b| compare_versions(&b.version, &a.version));
        Ok(Self { releases })
    }

    /// Load every release from `source` and build a store from it.
    pub fn load(source: &impl ReleaseSource) -> Result<Self> {
        let releases = source.load()?;
        Self::new(releases)
    }

    /// All releases, newest first. Callers that need a guaranteed order
    /// should sort explicitly.
    pub fn all(&self) -> &[Release] {
        &self.releases
    }

    /// All versions, newest first.
    pub fn versions(&self) -> Vec<&str> {
        self.releases.iter().map(|r| r.version.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.releases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    /// Look up one release by its exact version string.
    pub fn get(&self, version: &str) -> Result<&Release> {
        self.releases
            .iter()
            .find(|r| r.version == version)
            .ok_or_else(|| FeatureError::not_found("ReleaseStore::get", version))
    }

    /// Every release at or below `version`, oldest first.
    ///
    /// `version` itself must be present in the store even though the range
    /// includes older releases.
    pub fn up_to(&self, version: &str) -> Result<Vec<&Release>> {
        if self.get(version).is_err() {
            return Err(FeatureError::not_found("ReleaseStore::up_to", version));
        }

        let mut range: Vec<&Release> = self
            .releases
            .iter()
            .filter(|r| compare_versions(&r.version, version) != Ordering::Greater)
            .collect();
        range.sort_by(|a, b| compare_versions(&a.version, &b.version));
        Ok(range)
    }

    /// The minimum version in the store.
    pub fn oldest_version(&self) -> Result<&str> {
        self.releases
            .iter()
            .min_by(|a, b| compare_versions(&a.version, &b.version))
            .map(|r| r.version.as_str())
            .ok_or_else(|| {
                FeatureError::internal("ReleaseStore::oldest_version", "no releases available")
            })
    }

    /// The maximum version in the store.
    pub fn latest_version(&self) -> Result<&str> {
        self.releases
            .iter()
            .max_by(|a, b| compare_versions(&a.version, &b.version))
            .map(|r| r.version.as_str())
            .ok_or_else(|| {
                FeatureError::internal("ReleaseStore::latest_version", "no releases available")
            })
    }
}
