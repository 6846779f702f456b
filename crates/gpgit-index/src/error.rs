//! Error types for the index crate.

use std::path::PathBuf;

/// Errors that can occur during index operations.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// An invalid path was provided.
    #[error("invalid path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    /// A path given for staging does not exist.
    #[error("no such file or directory: {0}")]
    PathNotFound(PathBuf),

    /// A path lies outside the repository root.
    #[error("path {0} is outside the repository")]
    OutsideRepository(PathBuf),

    /// Store operation failed.
    #[error("store error: {0}")]
    Store(#[from] gpgit_store::StoreError),

    /// The index file could not be parsed or written.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Working directory I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for index results.
pub type IndexResult<T> = Result<T, IndexError>;
