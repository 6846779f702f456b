use std::collections::HashMap;
use std::sync::RwLock;

use gpgit_types::ObjectId;

use crate::error::StoreResult;
use crate::traits::ObjectStore;

/// In-memory, HashMap-based object store.
///
/// Intended for tests. Raw tagged bytes are held behind a `RwLock`.
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<ObjectId, Vec<u8>>>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }

    /// Return a sorted list of all object IDs in the store.
    pub fn all_ids(&self) -> Vec<ObjectId> {
        let map = self.objects.read().expect("lock poisoned");
        let mut ids: Vec<ObjectId> = map.keys().copied().collect();
        ids.sort();
        ids
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn read_raw(&self, id: &ObjectId) -> StoreResult<Option<Vec<u8>>> {
        let map = self.objects.read().expect("lock poisoned");
        Ok(map.get(id).cloned())
    }

    fn write_raw(&self, id: &ObjectId, raw: &[u8]) -> StoreResult<bool> {
        let mut map = self.objects.write().expect("lock poisoned");
        if map.contains_key(id) {
            return Ok(false);
        }
        map.insert(*id, raw.to_vec());
        Ok(true)
    }

    fn exists(&self, id: &ObjectId) -> StoreResult<bool> {
        let map = self.objects.read().expect("lock poisoned");
        Ok(map.contains_key(id))
    }
}

impl std::fmt::Debug for InMemoryObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryObjectStore")
            .field("object_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commit::Commit;
    use crate::error::StoreError;
    use crate::traits::copy_object;
    use crate::tree::{Tree, TreeEntry};
    use gpgit_types::ObjectKind;
    use proptest::prelude::*;

    // -----------------------------------------------------------------------
    // Put / get
    // -----------------------------------------------------------------------

    #[test]
    fn put_then_get() {
        let store = InMemoryObjectStore::new();
        let id = store.put(b"hello world", ObjectKind::Blob).unwrap();
        assert_eq!(store.get(&id, Some(ObjectKind::Blob)).unwrap(), b"hello world");
        assert_eq!(store.get(&id, None).unwrap(), b"hello world");
    }

    #[test]
    fn put_is_idempotent() {
        let store = InMemoryObjectStore::new();
        let a = store.put(b"same", ObjectKind::Blob).unwrap();
        let b = store.put(b"same", ObjectKind::Blob).unwrap();
        assert_eq!(a, b);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn get_with_wrong_kind_is_mismatch() {
        let store = InMemoryObjectStore::new();
        let id = store.put(b"data", ObjectKind::Blob).unwrap();
        let err = store.get(&id, Some(ObjectKind::Tree)).unwrap_err();
        assert!(matches!(
            err,
            StoreError::ObjectTypeMismatch {
                expected: ObjectKind::Tree,
                actual: ObjectKind::Blob,
                ..
            }
        ));
    }

    #[test]
    fn get_missing_is_not_found() {
        let store = InMemoryObjectStore::new();
        let id = ObjectId::from_hash([9; 20]);
        assert!(matches!(
            store.get(&id, None),
            Err(StoreError::ObjectNotFound(missing)) if missing == id
        ));
        assert!(!store.exists(&id).unwrap());
    }

    #[test]
    fn get_tagged_reports_kind() {
        let store = InMemoryObjectStore::new();
        let commit = Commit::new(ObjectId::from_hash([1; 20]), vec![], "msg");
        let id = store.put_commit(&commit).unwrap();
        let object = store.get_tagged(&id).unwrap();
        assert_eq!(object.kind, ObjectKind::Commit);
        assert_eq!(object.compute_id(), id);
    }

    // -----------------------------------------------------------------------
    // Codecs through the store
    // -----------------------------------------------------------------------

    #[test]
    fn tree_and_commit_roundtrip() {
        let store = InMemoryObjectStore::new();
        let blob = store.put(b"x", ObjectKind::Blob).unwrap();
        let tree = Tree::new(vec![TreeEntry::blob("x.txt", blob)]);
        let tree_id = store.put_tree(&tree).unwrap();
        assert_eq!(store.get_tree(&tree_id).unwrap(), tree);

        let commit = Commit::new(tree_id, vec![], "first");
        let commit_id = store.put_commit(&commit).unwrap();
        assert_eq!(store.get_commit(&commit_id).unwrap(), commit);
        assert!(matches!(
            store.get_commit(&tree_id),
            Err(StoreError::ObjectTypeMismatch { .. })
        ));
    }

    // -----------------------------------------------------------------------
    // Copy
    // -----------------------------------------------------------------------

    #[test]
    fn copy_transfers_raw_bytes() {
        let from = InMemoryObjectStore::new();
        let to = InMemoryObjectStore::new();
        let id = from.put(b"payload", ObjectKind::Blob).unwrap();
        copy_object(&id, &from, &to).unwrap();
        assert_eq!(to.get(&id, Some(ObjectKind::Blob)).unwrap(), b"payload");
        assert_eq!(to.read_raw(&id).unwrap(), from.read_raw(&id).unwrap());
    }

    #[test]
    fn copy_missing_object_fails() {
        let from = InMemoryObjectStore::new();
        let to = InMemoryObjectStore::new();
        let id = ObjectId::from_hash([3; 20]);
        assert!(matches!(
            copy_object(&id, &from, &to),
            Err(StoreError::ObjectNotFound(_))
        ));
        assert!(to.is_empty());
    }

    proptest! {
        #[test]
        fn same_content_single_object(data in proptest::collection::vec(any::<u8>(), 0..512)) {
            let store = InMemoryObjectStore::new();
            let a = store.put(&data, ObjectKind::Blob).unwrap();
            let b = store.put(&data, ObjectKind::Blob).unwrap();
            prop_assert_eq!(a, b);
            prop_assert_eq!(store.all_ids(), vec![a]);
        }
    }
}
