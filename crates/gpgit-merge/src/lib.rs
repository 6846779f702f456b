//! Merge engine for gpgit.
//!
//! Implements three-way merges of whole trees. The line-level combination
//! of one file is delegated to a [`MergeDriver`], so the engine itself only
//! decides which paths to merge and how to record the results.
//!
//! # Drivers
//!
//! - [`NativeMergeDriver`]: in-process diff3 built on `similar`
//! - [`Diff3Driver`]: shells out to `diff3 -m`

pub mod diff3;
pub mod driver;
pub mod error;
pub mod native;
pub mod tree_merge;

pub use diff3::Diff3Driver;
pub use driver::{DriverKind, MergeDriver, MergeLabels, MergeOutcome};
pub use error::{MergeError, MergeResult};
pub use native::NativeMergeDriver;
pub use tree_merge::{merge_trees, TreeMerge};
