//! Release record ingestion.
//!
//! A [`ReleaseSource`] hands the store a fully validated set of releases or
//! fails outright. Two sources ship with the crate:
//! - [`EmbeddedCorpus`]: release notes compiled into the binary
//! - [`DirectorySource`]: every `*.json` file in a directory

use std::path::PathBuf;

use tracing::debug;

use crate::domain::error::LoadError;
use crate::domain::release::Release;
use crate::version::is_well_formed;

/// Supplier of release records for store construction.
pub trait ReleaseSource {
    /// Load every release. Any bad record fails the whole load.
    fn load(&self) -> Result<Vec<Release>, LoadError>;

    /// Human-readable origin, used in logs.
    fn describe(&self) -> String;
}

/// Release notes bundled at compile time.
const EMBEDDED_RELEASES: &[(&str, &str)] = &[
    ("go1.21.json", include_str!("../data/releases/go1.21.json")),
    ("go1.22.json", include_str!("../data/releases/go1.22.json")),
    ("go1.23.json", include_str!("../data/releases/go1.23.json")),
    ("go1.24.json", include_str!("../data/releases/go1.24.json")),
];

/// The corpus embedded in the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedCorpus;

impl ReleaseSource for EmbeddedCorpus {
    fn load(&self) -> Result<Vec<Release>, LoadError> {
        EMBEDDED_RELEASES
            .iter()
            .map(|(name, text)| parse_release(name, text))
            .collect()
    }

    fn describe(&self) -> String {
        "embedded corpus".to_string()
    }
}

/// Reads release JSON files from a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn json_files(&self) -> Result<Vec<PathBuf>, LoadError> {
        let io_err = |source| LoadError::Io {
            path: self.root.clone(),
            source,
        };

        let mut files = Vec::new();
        for entry in std::fs::read_dir(&self.root).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            let path = entry.path();
            let is_json = path.extension().is_some_and(|ext| ext == "json");
            if is_json && entry.file_type().map_err(io_err)?.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

impl ReleaseSource for DirectorySource {
    fn load(&self) -> Result<Vec<Release>, LoadError> {
        let files = self.json_files()?;
        if files.is_empty() {
            return Err(LoadError::Empty {
                origin: self.root.display().to_string(),
            });
        }

        let mut releases = Vec::with_capacity(files.len());
        for path in files {
            let text = std::fs::read_to_string(&path).map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            })?;
            let name = path.display().to_string();
            debug!(file = %name, "parsing release file");
            releases.push(parse_release(&name, &text)?);
        }
        Ok(releases)
    }

    fn describe(&self) -> String {
        format!("directory {}", self.root.display())
    }
}

/// Parse and validate a single release document.
///
/// `name` identifies the document in error messages.
pub fn parse_release(name: &str, text: &str) -> Result<Release, LoadError> {
    let release: Release = serde_json::from_str(text).map_err(|source| LoadError::Parse {
        name: name.to_string(),
        source,
    })?;
    validate_release(name, &release)?;
    Ok(release)
}

fn validate_release(name: &str, release: &Release) -> Result<(), LoadError> {
    let invalid = |reason: String| LoadError::InvalidRecord {
        name: name.to_string(),
        reason,
    };

    if !is_well_formed(&release.version) {
        return Err(invalid(format!(
            "version '{}' is not a dotted numeric version",
            release.version
        )));
    }
    if release.library_changes.keys().any(|lib| lib.trim().is_empty()) {
        return Err(invalid("library name must not be empty".to_string()));
    }
    Ok(())
}
