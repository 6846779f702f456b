//! Core reference types.

use std::fmt;

use gpgit_types::ObjectId;

use crate::error::{RefError, Result};

pub const HEAD: &str = "HEAD";
pub const MERGE_HEAD: &str = "MERGE_HEAD";
pub const HEADS_PREFIX: &str = "refs/heads/";
pub const TAGS_PREFIX: &str = "refs/tags/";
pub const REMOTE_PREFIX: &str = "refs/remote/";

const SYMBOLIC_MARKER: &str = "ref: ";

/// The value stored in a reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RefValue {
    /// Points straight at an object.
    Direct(ObjectId),
    /// Points at another reference by name.
    Symbolic(String),
}

impl RefValue {
    pub fn symbolic(target: impl Into<String>) -> Self {
        Self::Symbolic(target.into())
    }

    pub fn is_symbolic(&self) -> bool {
        matches!(self, Self::Symbolic(_))
    }

    pub fn as_direct(&self) -> Option<ObjectId> {
        match self {
            Self::Direct(id) => Some(*id),
            Self::Symbolic(_) => None,
        }
    }

    /// Parse the textual form written in ref files.
    ///
    /// `name` is only used for error reporting.
    pub fn parse(name: &str, content: &str) -> Result<Self> {
        let content = content.trim();
        if let Some(target) = content.strip_prefix(SYMBOLIC_MARKER) {
            return Ok(Self::Symbolic(target.trim().to_string()));
        }
        ObjectId::from_hex(content)
            .map(Self::Direct)
            .map_err(|_| RefError::Malformed {
                name: name.to_string(),
                content: content.to_string(),
            })
    }
}

impl fmt::Display for RefValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct(id) => write!(f, "{id}"),
            Self::Symbolic(target) => write!(f, "{SYMBOLIC_MARKER}{target}"),
        }
    }
}

/// Where `HEAD` currently points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Head {
    /// On a branch: `HEAD` holds `ref: refs/heads/<name>`.
    Branch(String),
    /// Detached at a specific commit.
    Detached(ObjectId),
}

/// Summary of a local branch for listings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BranchInfo {
    /// Short name without `refs/heads/`.
    pub name: String,
    pub target: ObjectId,
    /// Whether `HEAD` is symbolically attached to this branch.
    pub is_current: bool,
}
