//! Release records and the change entries they carry.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Area of the toolchain a [`Change`] applies to.
///
/// Open set: values outside the known ones are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Language,
    Runtime,
    Toolchain,
    Performance,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Language => "language",
            Category::Runtime => "runtime",
            Category::Toolchain => "toolchain",
            Category::Performance => "performance",
            Category::Other(s) => s,
        }
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        match s.as_str() {
            "language" => Category::Language,
            "runtime" => Category::Runtime,
            "toolchain" => Category::Toolchain,
            "performance" => Category::Performance,
            _ => Category::Other(s),
        }
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Category::from(s.to_string())
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        match c {
            Category::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a change affects existing code.
///
/// Open set: unrecognized values pass through unchanged in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Impact {
    New,
    Enhancement,
    Deprecation,
    Breaking,
    Performance,
    Other(String),
}

impl Impact {
    pub fn as_str(&self) -> &str {
        match self {
            Impact::New => "new",
            Impact::Enhancement => "enhancement",
            Impact::Deprecation => "deprecation",
            Impact::Breaking => "breaking",
            Impact::Performance => "performance",
            Impact::Other(s) => s,
        }
    }
}

impl From<String> for Impact {
    fn from(s: String) -> Self {
        match s.as_str() {
            "new" => Impact::New,
            "enhancement" => Impact::Enhancement,
            "deprecation" => Impact::Deprecation,
            "breaking" => Impact::Breaking,
            "performance" => Impact::Performance,
            _ => Impact::Other(s),
        }
    }
}

impl From<&str> for Impact {
    fn from(s: &str) -> Self {
        Impact::from(s.to_string())
    }
}

impl From<Impact> for String {
    fn from(i: Impact) -> Self {
        match i {
            Impact::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A language, runtime, or toolchain level change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub category: Category,
    pub description: String,
    pub impact: Impact,
}

impl Change {
    pub fn new(
        category: impl Into<Category>,
        description: impl Into<String>,
        impact: impl Into<Impact>,
    ) -> Self {
        Self {
            category: category.into(),
            description: description.into(),
            impact: impact.into(),
        }
    }
}

/// A change scoped to one library package.
///
/// `symbol` is the function or type the change touches; `None` means the
/// change applies to the package as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LibraryChangeRecord")]
pub struct LibraryChange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    pub description: String,
    pub impact: Impact,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl LibraryChange {
    /// Package-wide change with no symbol.
    pub fn new(description: impl Into<String>, impact: impl Into<Impact>) -> Self {
        Self {
            symbol: None,
            description: description.into(),
            impact: impact.into(),
            example: None,
        }
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }
}

/// On-disk shape of a library change. Release notes name the symbol as
/// `symbol`, `function`, or `type`; empty strings mean absent.
#[derive(Deserialize)]
struct LibraryChangeRecord {
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default)]
    function: Option<String>,
    #[serde(default, rename = "type")]
    type_name: Option<String>,
    description: String,
    impact: Impact,
    #[serde(default)]
    example: Option<String>,
}

impl From<LibraryChangeRecord> for LibraryChange {
    fn from(r: LibraryChangeRecord) -> Self {
        let symbol = [r.symbol, r.function, r.type_name]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty());
        Self {
            symbol,
            description: r.description,
            impact: r.impact,
            example: r.example.filter(|e| !e.is_empty()),
        }
    }
}

/// One version's worth of change data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Dotted numeric version, unique within a store.
    pub version: String,

    /// Informational only; never used for ordering.
    pub release_date: DateTime<Utc>,

    pub summary: String,

    /// Language, runtime, and toolchain changes in published order.
    #[serde(rename = "changes", default)]
    pub general_changes: Vec<Change>,

    /// Library name to its changes in published order.
    #[serde(rename = "packages", alias = "libraries", default)]
    pub library_changes: BTreeMap<String, Vec<LibraryChange>>,
}

impl Release {
    /// Create an empty release for `version`.
    pub fn new(
        version: impl Into<String>,
        release_date: DateTime<Utc>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            version: version.into(),
            release_date,
            summary: summary.into(),
            general_changes: Vec::new(),
            library_changes: BTreeMap::new(),
        }
    }

    pub fn with_change(mut self, change: Change) -> Self {
        self.general_changes.push(change);
        self
    }

    pub fn with_library_change(mut self, library: impl Into<String>, change: LibraryChange) -> Self {
        self.library_changes
            .entry(library.into())
            .or_default()
            .push(change);
        self
    }

    /// Total number of library-level entries across all libraries.
    pub fn library_change_count(&self) -> usize {
        self.library_changes.values().map(Vec::len).sum()
    }
}
