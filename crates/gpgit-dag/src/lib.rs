//! Commit graph for gpgit.
//!
//! Commits form a DAG through their parent ids. This crate creates commits
//! (advancing `HEAD` and consuming `MERGE_HEAD`) and answers ancestry
//! questions by walking the graph lazily out of an [`ObjectStore`].
//!
//! [`ObjectStore`]: gpgit_store::ObjectStore

pub mod ancestors;
pub mod commit;
pub mod error;
pub mod graph;

pub use ancestors::Ancestors;
pub use commit::commit;
pub use error::{DagError, DagResult};
pub use graph::CommitGraph;
