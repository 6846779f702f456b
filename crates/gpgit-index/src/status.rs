//! Working directory status types.
//!
//! These types represent the result of comparing HEAD, the index and the
//! working directory against each other.

use std::fmt;

use gpgit_types::ObjectId;

/// Kind of change for a single path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FileStatus {
    New,
    Modified,
    Deleted,
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::New => "new file",
            Self::Modified => "modified",
            Self::Deleted => "deleted",
        })
    }
}

/// A single changed path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusEntry {
    pub path: String,
    pub status: FileStatus,
}

impl StatusEntry {
    pub fn new(path: impl Into<String>, status: FileStatus) -> Self {
        Self {
            path: path.into(),
            status,
        }
    }
}

/// Complete status of a repository.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkdirStatus {
    /// Branch `HEAD` is attached to, if any.
    pub branch: Option<String>,
    /// Commit `HEAD` resolves to; `None` before the first commit.
    pub head: Option<ObjectId>,
    /// Commit being merged, while a merge is pending.
    pub merge_head: Option<ObjectId>,
    /// Differences between the HEAD tree and the index.
    pub staged: Vec<StatusEntry>,
    /// Differences between the index and the working directory.
    pub unstaged: Vec<StatusEntry>,
}

impl WorkdirStatus {
    /// Returns `true` if nothing is staged or modified.
    pub fn is_clean(&self) -> bool {
        self.staged.is_empty() && self.unstaged.is_empty()
    }

    pub fn is_merging(&self) -> bool {
        self.merge_head.is_some()
    }
}
