use std::collections::{HashSet, VecDeque};

use gpgit_store::ObjectStore;
use gpgit_types::ObjectId;

use crate::error::DagResult;

/// Lazy walk over every commit reachable from a set of seeds.
///
/// Traversal is breadth-first with a visited set. When a commit is
/// expanded, its first parent goes to the **front** of the queue and the
/// remaining parents to the back, so the primary lineage is followed ahead
/// of side branches. A commit's parents are only read once the commit
/// itself has been yielded.
///
/// Each item is a `Result` because the walk reads commits from the store;
/// iteration stops after the first error.
pub struct Ancestors<'a> {
    store: &'a dyn ObjectStore,
    queue: VecDeque<ObjectId>,
    visited: HashSet<ObjectId>,
    expand: Option<ObjectId>,
}

impl<'a> Ancestors<'a> {
    pub fn new(store: &'a dyn ObjectStore, seeds: impl IntoIterator<Item = ObjectId>) -> Self {
        Self {
            store,
            queue: seeds.into_iter().collect(),
            visited: HashSet::new(),
            expand: None,
        }
    }

    fn enqueue_parents(&mut self, id: &ObjectId) -> DagResult<()> {
        let commit = self.store.get_commit(id)?;
        let mut parents = commit.parents.into_iter();
        if let Some(first) = parents.next() {
            self.queue.push_front(first);
        }
        self.queue.extend(parents);
        Ok(())
    }
}

impl Iterator for Ancestors<'_> {
    type Item = DagResult<ObjectId>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(previous) = self.expand.take() {
            if let Err(e) = self.enqueue_parents(&previous) {
                self.queue.clear();
                return Some(Err(e));
            }
        }
        while let Some(id) = self.queue.pop_front() {
            if self.visited.insert(id) {
                self.expand = Some(id);
                return Some(Ok(id));
            }
        }
        None
    }
}
