/// Errors from parsing foundation types.
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
    /// A hex string could not be decoded.
    #[error("invalid hex encoding: {0}")]
    InvalidHex(String),

    /// Decoded bytes have the wrong length.
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// An object type tag other than `blob`, `tree` or `commit`.
    #[error("unknown object kind: {0:?}")]
    UnknownKind(String),
}
