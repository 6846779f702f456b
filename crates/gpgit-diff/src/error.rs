//! Error types for the diff engine.

/// Errors that can occur while computing diffs.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// A blob referenced by one side could not be read.
    #[error("store error: {0}")]
    Store(#[from] gpgit_store::StoreError),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
