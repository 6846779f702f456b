//! Error types for the merge engine.

/// Errors that can occur while merging.
///
/// Conflicts are not errors; they are reported in the merge result.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// The line-level merge driver failed to produce a result.
    #[error("merge driver failed: {0}")]
    Driver(String),

    /// Reading or writing blobs failed.
    #[error("store error: {0}")]
    Store(#[from] gpgit_store::StoreError),

    /// Temporary files for an external driver could not be prepared.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
