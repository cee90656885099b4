//! Error types for depstrap operations.
//!
//! This module defines [`DepstrapError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - A broken manifest is the only error fatal to a whole run
//! - Per-dependency errors are caught at the runner boundary, logged, and
//!   counted; the run continues with the next dependency
//! - Use `anyhow::Error` (via `DepstrapError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for depstrap operations.
#[derive(Debug, Error)]
pub enum DepstrapError {
    /// Manifest file not found at expected location.
    #[error("Manifest not found: {path}")]
    ManifestNotFound { path: PathBuf },

    /// Failed to parse the manifest file.
    #[error("Failed to parse manifest at {path}: {message}")]
    ManifestParseError { path: PathBuf, message: String },

    /// Initial clone of a git dependency failed.
    #[error("Failed to clone '{name}': {message}")]
    GitCloneFailed { name: String, message: String },

    /// A git subcommand exited non-zero.
    #[error("'{command}' failed: {message}")]
    GitCommandFailed { command: String, message: String },

    /// Neither the literal revision nor its `v`-prefixed form exists.
    #[error("Could not find revision '{requested}' or '{fallback}' for '{name}'")]
    RevisionNotFound {
        name: String,
        requested: String,
        fallback: String,
    },

    /// Archive download failed (already logged as a warning at the source).
    #[error("Failed to download '{name}' from {url}")]
    DownloadFailed { name: String, url: String },

    /// Downloaded container could not be extracted.
    #[error("Failed to extract '{name}': {message}")]
    ExtractionFailed { name: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for depstrap operations.
pub type Result<T> = std::result::Result<T, DepstrapError>;
