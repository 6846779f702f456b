use std::path::Path;

use gpgit_refs::{FsRefStore, RefStore};
use gpgit_store::{FsObjectStore, ObjectStore};
use gpgit_types::RepositoryHandle;

use crate::error::{SyncError, SyncResult};

/// One side of a sync: its object store and its ref store.
#[derive(Clone, Copy)]
pub struct Endpoint<'a> {
    pub objects: &'a dyn ObjectStore,
    pub refs: &'a dyn RefStore,
}

impl<'a> Endpoint<'a> {
    pub fn new(objects: &'a dyn ObjectStore, refs: &'a dyn RefStore) -> Self {
        Self { objects, refs }
    }
}

/// A remote repository opened through its own [`RepositoryHandle`].
#[derive(Debug)]
pub struct FsRemote {
    handle: RepositoryHandle,
    objects: FsObjectStore,
    refs: FsRefStore,
}

impl FsRemote {
    /// Open the repository at `root`, which must already be initialized.
    pub fn open(root: &Path, control_dir: &str) -> SyncResult<Self> {
        let handle = RepositoryHandle::new(root, control_dir);
        if !handle.is_initialized() {
            return Err(SyncError::NotARepository(root.to_path_buf()));
        }
        Ok(Self {
            objects: FsObjectStore::open(&handle),
            refs: FsRefStore::open(&handle),
            handle,
        })
    }

    pub fn handle(&self) -> &RepositoryHandle {
        &self.handle
    }

    pub fn endpoint(&self) -> Endpoint<'_> {
        Endpoint::new(&self.objects, &self.refs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_a_plain_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            FsRemote::open(dir.path(), ".gpgit"),
            Err(SyncError::NotARepository(_))
        ));
    }

    #[test]
    fn opening_an_initialized_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".gpgit/objects")).unwrap();
        let remote = FsRemote::open(dir.path(), ".gpgit").unwrap();
        assert_eq!(remote.handle().root(), dir.path());
        assert!(remote.endpoint().refs.list("refs/heads/").unwrap().is_empty());
    }
}
