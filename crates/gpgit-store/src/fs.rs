use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use gpgit_types::{ObjectId, RepositoryHandle};
use tracing::debug;

use crate::error::StoreResult;
use crate::traits::ObjectStore;

/// Object store backed by one file per object.
///
/// Objects live at `<control>/objects/<hex-id>` and contain the tagged
/// payload `kind || 0x00 || data`.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    dir: PathBuf,
}

impl FsObjectStore {
    /// Store rooted at an explicit objects directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store for the repository described by `handle`.
    pub fn open(handle: &RepositoryHandle) -> Self {
        Self::new(handle.objects_dir())
    }

    /// Create the objects directory if it does not exist.
    pub fn init(&self) -> StoreResult<()> {
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &ObjectId) -> PathBuf {
        self.dir.join(id.to_hex())
    }

    /// All object ids present on disk, sorted.
    pub fn all_ids(&self) -> StoreResult<Vec<ObjectId>> {
        let mut ids = Vec::new();
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ids),
            Err(e) => return Err(e.into()),
        };
        for entry in entries {
            let entry = entry?;
            if let Some(id) = entry
                .file_name()
                .to_str()
                .and_then(|name| ObjectId::from_hex(name).ok())
            {
                ids.push(id);
            }
        }
        ids.sort();
        Ok(ids)
    }
}

impl ObjectStore for FsObjectStore {
    fn read_raw(&self, id: &ObjectId) -> StoreResult<Option<Vec<u8>>> {
        match fs::read(self.path_for(id)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write_raw(&self, id: &ObjectId, raw: &[u8]) -> StoreResult<bool> {
        let path = self.path_for(id);
        if path.is_file() {
            return Ok(false);
        }
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, raw)?;
        debug!(object = %id.short_hex(), bytes = raw.len(), "wrote object");
        Ok(true)
    }

    fn exists(&self, id: &ObjectId) -> StoreResult<bool> {
        Ok(self.path_for(id).is_file())
    }
}
