//! Error taxonomy for release queries and corpus loading.

use std::path::PathBuf;

/// Errors produced while loading release records.
///
/// Any of these aborts store construction; there is never a partial corpus.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse release data from {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid release record in {name}: {reason}")]
    InvalidRecord { name: String, reason: String },

    #[error("duplicate release version {version}")]
    DuplicateVersion { version: String },

    #[error("no release data found in {origin}")]
    Empty { origin: String },
}

/// Coarse classification used at the caller boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller input was missing or malformed.
    Validation,
    /// A referenced version is absent from the store.
    NotFound,
    /// The store was built incorrectly; not recoverable per query.
    Internal,
}

/// Errors surfaced by the store, the aggregation engine, and the service.
#[derive(Debug, thiserror::Error)]
pub enum FeatureError {
    #[error("validation error in {operation}: {message}")]
    Validation {
        operation: &'static str,
        message: String,
    },

    #[error("{operation}: release {version} not found")]
    NotFound {
        operation: &'static str,
        version: String,
    },

    #[error("internal error in {operation}: {message}")]
    Internal {
        operation: &'static str,
        message: String,
    },

    #[error("release data could not be loaded: {0}")]
    Load(#[from] LoadError),
}

impl FeatureError {
    pub fn validation(operation: &'static str, message: impl Into<String>) -> Self {
        FeatureError::Validation {
            operation,
            message: message.into(),
        }
    }

    pub fn not_found(operation: &'static str, version: impl Into<String>) -> Self {
        FeatureError::NotFound {
            operation,
            version: version.into(),
        }
    }

    pub fn internal(operation: &'static str, message: impl Into<String>) -> Self {
        FeatureError::Internal {
            operation,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FeatureError::Validation { .. } => ErrorKind::Validation,
            FeatureError::NotFound { .. } => ErrorKind::NotFound,
            FeatureError::Internal { .. } | FeatureError::Load(_) => ErrorKind::Internal,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}

/// Result type for release queries.
pub type Result<T> = std::result::Result<T, FeatureError>;
