use gpgit_types::ObjectId;

use crate::error::{StoreError, StoreResult};

/// A commit record.
///
/// `parents[0]` is the primary lineage; a merge commit carries the merged
/// commit as its second parent. Only the first commit of a history has no
/// parents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Commit {
    pub tree: ObjectId,
    pub parents: Vec<ObjectId>,
    pub message: String,
}

impl Commit {
    pub fn new(tree: ObjectId, parents: Vec<ObjectId>, message: impl Into<String>) -> Self {
        Self {
            tree,
            parents,
            message: message.into(),
        }
    }

    pub fn first_parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    /// Serialize as `tree <id>\n`, `parent <id>\n`*, a blank line, then the
    /// message verbatim.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = format!("tree {}\n", self.tree);
        for parent in &self.parents {
            out.push_str(&format!("parent {parent}\n"));
        }
        out.push('\n');
        out.push_str(&self.message);
        out.into_bytes()
    }

    pub fn decode(data: &[u8]) -> StoreResult<Self> {
        let text = std::str::from_utf8(data)
            .map_err(|_| StoreError::MalformedCommit("payload is not UTF-8".into()))?;
        let (header, message) = text
            .split_once("\n\n")
            .unwrap_or((text.trim_end_matches('\n'), ""));

        let mut tree = None;
        let mut parents = Vec::new();
        for line in header.lines() {
            let (key, value) = line
                .split_once(' ')
                .ok_or_else(|| StoreError::MalformedCommit(format!("bad header line {line:?}")))?;
            let id = ObjectId::from_hex(value)
                .map_err(|e| StoreError::MalformedCommit(format!("{key}: {e}")))?;
            match key {
                "tree" if tree.is_none() => tree = Some(id),
                "tree" => return Err(StoreError::MalformedCommit("duplicate tree line".into())),
                "parent" => parents.push(id),
                other => {
                    return Err(StoreError::MalformedCommit(format!(
                        "unknown header key {other:?}"
                    )))
                }
            }
        }

        let tree = tree.ok_or_else(|| StoreError::MalformedCommit("missing tree line".into()))?;
        Ok(Self::new(tree, parents, message))
    }
}
