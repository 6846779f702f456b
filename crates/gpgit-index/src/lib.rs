//! Staging index and tree codec for gpgit.
//!
//! The index is a flat `path -> blob id` mapping. [`write_tree`] folds it
//! into nested tree objects, [`read_tree`] flattens a tree back into a
//! mapping, and [`WorkingTree`] moves mappings between the object store and
//! the working directory.
//!
//! # Key Types
//!
//! - [`Index`]: the staging area (BTreeMap-backed, persisted as JSON)
//! - [`TreeBuilder`]: trie of path segments serialized bottom-up
//! - [`WorkingTree`]: scan, stage and materialize working-directory files
//! - [`WorkdirStatus`]: result of status computation

pub mod error;
pub mod index;
pub mod status;
pub mod tree;
pub mod workdir;

pub use error::{IndexError, IndexResult};
pub use index::{FileSet, Index};
pub use status::{FileStatus, StatusEntry, WorkdirStatus};
pub use tree::{read_tree, write_tree, TreeBuilder};
pub use workdir::WorkingTree;
