//! Foundation types for gpgit.
//!
//! Every other gpgit crate depends on `gpgit-types`.
//!
//! # Key Types
//!
//! - [`ObjectId`]: Content-addressed identifier (SHA-1 of `kind\0payload`)
//! - [`ObjectKind`]: The three object type tags: blob, tree, commit
//! - [`RepositoryHandle`]: Root directory plus control directory of one repository

pub mod error;
pub mod layout;
pub mod object;

pub use error::TypeError;
pub use layout::{RepositoryHandle, DEFAULT_CONTROL_DIR};
pub use object::{ObjectId, ObjectKind};
