use gpgit_types::{ObjectId, ObjectKind};

use crate::commit::Commit;
use crate::error::{StoreError, StoreResult};
use crate::object::{encode_tagged, StoredObject};
use crate::tree::Tree;

/// Content-addressed object store.
///
/// Backends only move raw tagged bytes; hashing, tag checks and the tree
/// and commit codecs are provided methods shared by every backend.
///
/// - Objects are immutable once written. Writing an existing id is a no-op.
/// - Normal operation never deletes an object.
/// - All I/O errors are propagated, never silently ignored.
pub trait ObjectStore: Send + Sync {
    /// Read the raw tagged bytes of an object.
    ///
    /// Returns `Ok(None)` if the object does not exist.
    fn read_raw(&self, id: &ObjectId) -> StoreResult<Option<Vec<u8>>>;

    /// Store raw tagged bytes under `id` unless already present.
    ///
    /// Returns `true` if the object was newly written. The bytes are not
    /// re-hashed.
    fn write_raw(&self, id: &ObjectId, raw: &[u8]) -> StoreResult<bool>;

    /// Check whether an object exists in the store.
    fn exists(&self, id: &ObjectId) -> StoreResult<bool>;

    /// Hash `data` as `kind`, store it if absent, and return the id.
    fn put(&self, data: &[u8], kind: ObjectKind) -> StoreResult<ObjectId> {
        let id = ObjectId::hash(kind, data);
        if !self.exists(&id)? {
            self.write_raw(&id, &encode_tagged(kind, data))?;
        }
        Ok(id)
    }

    /// Read an object along with its type tag.
    fn get_tagged(&self, id: &ObjectId) -> StoreResult<StoredObject> {
        let raw = self
            .read_raw(id)?
            .ok_or(StoreError::ObjectNotFound(*id))?;
        StoredObject::decode(id, &raw)
    }

    /// Read an object's payload, optionally checking its type tag.
    fn get(&self, id: &ObjectId, expected: Option<ObjectKind>) -> StoreResult<Vec<u8>> {
        let object = self.get_tagged(id)?;
        match expected {
            Some(expected) if expected != object.kind => Err(StoreError::ObjectTypeMismatch {
                id: *id,
                expected,
                actual: object.kind,
            }),
            _ => Ok(object.data),
        }
    }

    fn put_tree(&self, tree: &Tree) -> StoreResult<ObjectId> {
        self.put(&tree.encode()?, ObjectKind::Tree)
    }

    fn get_tree(&self, id: &ObjectId) -> StoreResult<Tree> {
        Tree::decode(&self.get(id, Some(ObjectKind::Tree))?)
    }

    fn put_commit(&self, commit: &Commit) -> StoreResult<ObjectId> {
        self.put(&commit.encode(), ObjectKind::Commit)
    }

    fn get_commit(&self, id: &ObjectId) -> StoreResult<Commit> {
        Commit::decode(&self.get(id, Some(ObjectKind::Commit))?)
    }
}

/// Copy one object verbatim from `from` to `to`.
///
/// The raw tagged payload is transferred without re-validating its hash.
pub fn copy_object(id: &ObjectId, from: &dyn ObjectStore, to: &dyn ObjectStore) -> StoreResult<()> {
    let raw = from.read_raw(id)?.ok_or(StoreError::ObjectNotFound(*id))?;
    to.write_raw(id, &raw)?;
    Ok(())
}
