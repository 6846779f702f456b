//! In-memory repositories for sync tests.

use gpgit_refs::{InMemoryRefStore, RefStore, RefValue, HEAD};
use gpgit_store::{InMemoryObjectStore, ObjectStore, Tree, TreeEntry};
use gpgit_types::{ObjectId, ObjectKind};

use crate::endpoint::Endpoint;

pub(crate) struct Repo {
    pub objects: InMemoryObjectStore,
    pub refs: InMemoryRefStore,
}

impl Repo {
    pub fn new() -> Self {
        let refs = InMemoryRefStore::new();
        refs.update(HEAD, RefValue::symbolic("refs/heads/master"), false)
            .unwrap();
        Self {
            objects: InMemoryObjectStore::new(),
            refs,
        }
    }

    pub fn endpoint(&self) -> Endpoint<'_> {
        Endpoint::new(&self.objects, &self.refs)
    }

    /// Commit a single file `name` with `content` on the current branch.
    pub fn commit_file(&self, name: &str, content: &str) -> ObjectId {
        let blob = self.objects.put(content.as_bytes(), ObjectKind::Blob).unwrap();
        let tree = self
            .objects
            .put_tree(&Tree::new(vec![TreeEntry::blob(name, blob)]))
            .unwrap();
        gpgit_dag::commit(content, tree, &self.objects, &self.refs).unwrap()
    }

    pub fn branch(&self, name: &str) -> Option<ObjectId> {
        self.refs.value_of(&format!("refs/heads/{name}")).unwrap()
    }
}
