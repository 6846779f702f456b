//! Diff engine for gpgit.
//!
//! Compares flat `path -> blob id` mappings (commit trees, the index, the
//! working directory) and renders line-level differences between blobs.
//!
//! # Key Functions
//!
//! - [`diff_file_sets`] / [`outer_join`]: full outer join of mappings by path
//! - [`changed_files`]: new / modified / deleted paths between two mappings
//! - [`diff_blobs`]: unified diff of two file contents
//! - [`diff_trees`]: unified diff of every changed path between two mappings

pub mod blob_diff;
pub mod error;
pub mod file_sets;
pub mod tree_diff;

pub use blob_diff::{diff_blobs, BlobDiff};
pub use error::{DiffError, DiffResult};
pub use file_sets::{changed_files, diff_file_sets, outer_join};
pub use tree_diff::diff_trees;
