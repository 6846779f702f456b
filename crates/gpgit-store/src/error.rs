use gpgit_types::{ObjectId, ObjectKind};

/// Errors from object store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested object was not found.
    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),

    /// The object exists but carries a different type tag.
    #[error("object {id} is a {actual}, expected a {expected}")]
    ObjectTypeMismatch {
        id: ObjectId,
        expected: ObjectKind,
        actual: ObjectKind,
    },

    /// The stored bytes are not a valid tagged payload.
    #[error("corrupt object {id}: {reason}")]
    CorruptObject { id: ObjectId, reason: String },

    /// A tree payload could not be decoded.
    #[error("malformed tree entry {entry:?}: {reason}")]
    MalformedTree { entry: String, reason: String },

    /// A commit payload could not be decoded.
    #[error("malformed commit: {0}")]
    MalformedCommit(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
