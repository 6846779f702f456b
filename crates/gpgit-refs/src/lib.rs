//! Reference management for gpgit.
//!
//! A reference is a named pointer, either **direct** (an object id) or
//! **symbolic** (`ref: <other ref>`). Symbolic chains are followed by the
//! resolution methods provided on [`RefStore`], so every backend shares the
//! same semantics.
//!
//! # Namespaces
//!
//! - `refs/heads/<branch>`: local branches
//! - `refs/tags/<label>`: tags
//! - `refs/remote/<branch>`: remote-tracking positions written by pull
//! - `HEAD`: symbolic on a branch, direct when detached
//! - `MERGE_HEAD`: present only while a merge is pending
//!
//! # Backends
//!
//! - [`FsRefStore`]: one file per ref under the control directory
//! - [`InMemoryRefStore`]: `BTreeMap`-backed store for tests

pub mod error;
pub mod fs;
pub mod memory;
pub mod names;
pub mod traits;
pub mod types;

pub use error::{RefError, Result};
pub use fs::FsRefStore;
pub use memory::InMemoryRefStore;
pub use names::{validate_branch_name, validate_ref_path, validate_tag_name};
pub use traits::{RefStore, MAX_SYMBOLIC_DEPTH};
pub use types::{
    BranchInfo, Head, RefValue, HEADS_PREFIX, HEAD, MERGE_HEAD, REMOTE_PREFIX, TAGS_PREFIX,
};
