//! High-level SDK for gpgit repositories.
//!
//! [`Repository`] ties the object store, ref store, index, working tree and
//! configured merge driver of one root together. The command line goes
//! through it for everything.

pub mod combine;
pub mod config;
pub mod error;
pub mod inspect;
pub mod remote;
pub mod repository;

#[cfg(test)]
mod test_support;

pub use combine::MergeReport;
pub use config::{MergeConfig, RepoConfig};
pub use error::{SdkError, SdkResult};
pub use inspect::{CommitDetails, DiffSide};
pub use repository::Repository;

// Re-export key types
pub use gpgit_index::{FileStatus, StatusEntry, WorkdirStatus};
pub use gpgit_refs::{BranchInfo, Head};
pub use gpgit_store::{Commit, StoredObject};
pub use gpgit_sync::{FetchResult, PushResult, RefUpdate};
pub use gpgit_types::{ObjectId, ObjectKind};
