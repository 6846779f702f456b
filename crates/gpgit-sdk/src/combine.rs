use gpgit_index::Index;
use gpgit_merge::merge_trees;
use gpgit_refs::{RefStore, RefValue, HEAD, MERGE_HEAD};
use gpgit_types::ObjectId;
use tracing::info;

use crate::error::{SdkError, SdkResult};
use crate::repository::Repository;

/// What [`Repository::combine`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MergeReport {
    /// `other` was already part of `HEAD`'s history; nothing changed.
    UpToDate,
    /// `HEAD` was an ancestor of `other` and now points at it.
    FastForward { from: ObjectId, to: ObjectId },
    /// A three-way merge was written to the index and working tree and
    /// `MERGE_HEAD` is set; the next commit records both parents.
    Merged {
        base: Option<ObjectId>,
        conflicts: Vec<String>,
    },
}

impl Repository {
    pub fn merge_base(&self, a: &str, b: &str) -> SdkResult<Option<ObjectId>> {
        let a = self.resolve(a)?;
        let b = self.resolve(b)?;
        Ok(self.graph().merge_base(a, b)?)
    }

    /// Merge the commit `name` resolves to into `HEAD`.
    pub fn combine(&self, name: &str) -> SdkResult<MergeReport> {
        let head = self.head()?.ok_or(SdkError::NoCommits)?;
        let other = self.resolve(name)?;
        let graph = self.graph();

        if graph.is_ancestor(other, head)? {
            info!(other = %other.short_hex(), "already up to date");
            return Ok(MergeReport::UpToDate);
        }

        let base = graph.merge_base(other, head)?;
        if base == Some(head) {
            let tree = self.get_commit(&other)?.tree;
            self.read_tree(&tree, true)?;
            self.refs.update(HEAD, RefValue::Direct(other), true)?;
            info!(from = %head.short_hex(), to = %other.short_hex(), "fast-forward");
            return Ok(MergeReport::FastForward {
                from: head,
                to: other,
            });
        }

        let merged = merge_trees(
            &self.objects,
            &*self.driver,
            &self.config.merge.labels,
            &self.commit_files(base)?,
            &self.commit_files(Some(head))?,
            &self.commit_files(Some(other))?,
        )?;
        self.working_tree()
            .materialize(&merged.files, &self.objects)?;
        self.save_index(&Index::from_entries(merged.files)?)?;
        // Only a merge that reached the working tree is pending.
        self.refs
            .update(MERGE_HEAD, RefValue::Direct(other), false)?;

        info!(
            head = %head.short_hex(),
            other = %other.short_hex(),
            conflicts = merged.conflicts.len(),
            "merge pending commit"
        );
        Ok(MergeReport::Merged {
            base,
            conflicts: merged.conflicts,
        })
    }
}
