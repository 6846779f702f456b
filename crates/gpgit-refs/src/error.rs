/// Errors that can occur during reference operations.
#[derive(Debug, thiserror::Error)]
pub enum RefError {
    /// A user-supplied name matched no reference and is not a raw id.
    #[error("unknown reference: {0}")]
    UnknownReference(String),

    /// A symbolic chain did not end within the hop limit.
    #[error("symbolic reference cycle starting at {0}")]
    SymbolicCycle(String),

    /// A branch, tag or ref path is not acceptable.
    #[error("invalid ref name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    /// A ref file holds neither an id nor a `ref:` pointer.
    #[error("malformed ref {name}: {content:?}")]
    Malformed { name: String, content: String },

    /// An I/O error occurred in the storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result alias for ref operations.
pub type Result<T> = std::result::Result<T, RefError>;
