//! Error types for catalog indexing.
//!
//! This module defines [`CatalogError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Fatal conditions (source fetch, relative path, temp dir, bad target
//!   version) are returned as `Err` and end the run
//! - Per-item conditions (one unreadable file, one bad override) are pushed
//!   into an error list and the run continues
//! - Use `anyhow::Error` (via `CatalogError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Settings file not found at the given location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse the settings file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// The catalog tree could not be fetched.
    #[error("Failed to fetch catalog from {url}: {message}")]
    SourceFetch { url: String, message: String },

    /// The current working directory could not be resolved.
    #[error("Failed to resolve working directory: {0}")]
    WorkingDir(#[source] std::io::Error),

    /// The temporary checkout directory could not be created.
    #[error("Failed to create temporary directory in {parent}: {source}")]
    TempDir {
        parent: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A walked path did not sit under the catalog root.
    #[error("Failed to compute path of {path} relative to {root}")]
    RelativePath { path: PathBuf, root: PathBuf },

    /// A directory entry could not be read during the walk.
    #[error("{path}: {message}")]
    Walk { path: PathBuf, message: String },

    /// A catalog file could not be read.
    #[error("{path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A catalog file could not be parsed.
    #[error("{path}: {message}")]
    FileParse { path: PathBuf, message: String },

    /// An override file of one template version could not be parsed.
    #[error("Failed to parse {file} for {id}: {message}")]
    OverrideParse {
        id: String,
        file: String,
        message: String,
    },

    /// The target platform version is not a semantic version.
    #[error("Invalid target version '{version}': {message}")]
    InvalidTargetVersion { version: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
