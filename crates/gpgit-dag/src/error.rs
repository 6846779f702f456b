//! Error types for the commit graph.

/// Errors that can occur during graph operations.
#[derive(Debug, thiserror::Error)]
pub enum DagError {
    /// Reading or writing an object failed.
    #[error("store error: {0}")]
    Store(#[from] gpgit_store::StoreError),

    /// Reading or updating a reference failed.
    #[error("ref error: {0}")]
    Ref(#[from] gpgit_refs::RefError),
}

/// Convenience alias for DAG results.
pub type DagResult<T> = Result<T, DagError>;
