//! Domain models for relnotes.
//!
//! Canonical definitions for the core entities:
//! - `Release`: one version's change data
//! - `Change`: a language/runtime/toolchain entry
//! - `LibraryChange`: an entry scoped to one library package

pub mod error;
pub mod release;

// Re-export main types and errors
pub use error::{ErrorKind, FeatureError, LoadError, Result};
pub use release::{Category, Change, Impact, LibraryChange, Release};
