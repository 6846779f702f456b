use serde::{Deserialize, Serialize};

use crate::error::MergeResult;

/// Result of merging one file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Merged bytes, with conflict markers where the sides disagree.
    pub content: Vec<u8>,
    /// Whether any region could not be merged cleanly.
    pub conflict: bool,
}

impl MergeOutcome {
    pub fn clean(content: Vec<u8>) -> Self {
        Self {
            content,
            conflict: false,
        }
    }
}

/// Names written into conflict markers for each side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeLabels {
    pub ours: String,
    pub base: String,
    pub theirs: String,
}

impl Default for MergeLabels {
    fn default() -> Self {
        Self {
            ours: "HEAD".into(),
            base: "BASE".into(),
            theirs: "MERGE_HEAD".into(),
        }
    }
}

/// Line-level three-way merge of a single file.
///
/// A missing side (`None`) is treated as an empty file.
pub trait MergeDriver: Send + Sync {
    fn merge(
        &self,
        base: Option<&[u8]>,
        ours: Option<&[u8]>,
        theirs: Option<&[u8]>,
        labels: &MergeLabels,
    ) -> MergeResult<MergeOutcome>;
}

/// Which driver a repository is configured to use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverKind {
    #[default]
    Native,
    Diff3,
}
