//! Ancestry queries over the commit DAG.

use std::collections::{BTreeSet, HashSet};

use gpgit_store::{Commit, ObjectStore};
use gpgit_types::{ObjectId, ObjectKind};
use tracing::debug;

use crate::ancestors::Ancestors;
use crate::error::DagResult;

/// Read-only view of the commit graph stored in an [`ObjectStore`].
#[derive(Clone, Copy)]
pub struct CommitGraph<'a> {
    store: &'a dyn ObjectStore,
}

impl<'a> CommitGraph<'a> {
    pub fn new(store: &'a dyn ObjectStore) -> Self {
        Self { store }
    }

    /// Lazy walk over the seeds and all their ancestors.
    pub fn ancestors_of(&self, seeds: impl IntoIterator<Item = ObjectId>) -> Ancestors<'a> {
        Ancestors::new(self.store, seeds)
    }

    /// A common ancestor of `a` and `b`.
    ///
    /// Collects every ancestor of `a` (inclusive), then returns the first
    /// ancestor of `b` in traversal order that is in that set. On criss-cross
    /// histories this is not necessarily a unique lowest common ancestor.
    pub fn merge_base(&self, a: ObjectId, b: ObjectId) -> DagResult<Option<ObjectId>> {
        let of_a = self
            .ancestors_of([a])
            .collect::<DagResult<HashSet<ObjectId>>>()?;
        for id in self.ancestors_of([b]) {
            let id = id?;
            if of_a.contains(&id) {
                debug!(a = %a.short_hex(), b = %b.short_hex(), base = %id.short_hex(), "found merge base");
                return Ok(Some(id));
            }
        }
        Ok(None)
    }

    /// Whether `candidate` is `of` or one of its ancestors.
    pub fn is_ancestor(&self, candidate: ObjectId, of: ObjectId) -> DagResult<bool> {
        for id in self.ancestors_of([of]) {
            if id? == candidate {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Every commit reachable from `seeds`, plus every tree and blob
    /// reachable from those commits' trees.
    ///
    /// One visited set is shared across all commits, so a subtree shared by
    /// many commits is expanded once.
    pub fn reachable_objects(
        &self,
        seeds: impl IntoIterator<Item = ObjectId>,
    ) -> DagResult<BTreeSet<ObjectId>> {
        let mut visited = BTreeSet::new();
        let mut commits = 0usize;
        for id in self.ancestors_of(seeds) {
            let id = id?;
            visited.insert(id);
            commits += 1;
            let commit = self.store.get_commit(&id)?;
            self.collect_tree(commit.tree, &mut visited)?;
        }
        debug!(commits, objects = visited.len(), "collected reachable objects");
        Ok(visited)
    }

    fn collect_tree(&self, root: ObjectId, visited: &mut BTreeSet<ObjectId>) -> DagResult<()> {
        if !visited.insert(root) {
            return Ok(());
        }
        let mut pending = vec![root];
        while let Some(tree_id) = pending.pop() {
            for entry in self.store.get_tree(&tree_id)?.into_entries() {
                if visited.insert(entry.id) && entry.kind == ObjectKind::Tree {
                    pending.push(entry.id);
                }
            }
        }
        Ok(())
    }

    /// History starting at `start`, in traversal order.
    pub fn log(&self, start: ObjectId) -> DagResult<Vec<(ObjectId, Commit)>> {
        let mut entries = Vec::new();
        for id in self.ancestors_of([start]) {
            let id = id?;
            entries.push((id, self.store.get_commit(&id)?));
        }
        Ok(entries)
    }
}
