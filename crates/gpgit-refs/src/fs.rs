use std::fs;
use std::io;
use std::path::PathBuf;

use gpgit_types::RepositoryHandle;
use walkdir::WalkDir;

use crate::error::Result;
use crate::names::validate_ref_path;
use crate::traits::RefStore;
use crate::types::{RefValue, HEAD, MERGE_HEAD};

/// Ref store backed by plain files under the control directory.
///
/// `refs/heads/master` lives at `<control>/refs/heads/master`; `HEAD` and
/// `MERGE_HEAD` sit directly in the control directory. Each file holds
/// either a hex id or `ref: <name>`.
#[derive(Debug, Clone)]
pub struct FsRefStore {
    handle: RepositoryHandle,
}

impl FsRefStore {
    pub fn open(handle: &RepositoryHandle) -> Self {
        Self {
            handle: handle.clone(),
        }
    }

    /// Create the `refs/heads` and `refs/tags` directories.
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(self.handle.ref_path("refs/heads"))?;
        fs::create_dir_all(self.handle.ref_path("refs/tags"))?;
        Ok(())
    }

    fn path_for(&self, name: &str) -> Result<PathBuf> {
        validate_ref_path(name)?;
        Ok(self.handle.ref_path(name))
    }
}

impl RefStore for FsRefStore {
    fn read_ref(&self, name: &str) -> Result<Option<RefValue>> {
        // A name that cannot map to a file cannot name an existing ref.
        let Ok(path) = self.path_for(name) else {
            return Ok(None);
        };
        if !path.is_file() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        RefValue::parse(name, &content).map(Some)
    }

    fn write_ref(&self, name: &str, value: &RefValue) -> Result<()> {
        let path = self.path_for(name)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, value.to_string())?;
        Ok(())
    }

    fn delete_ref(&self, name: &str) -> Result<bool> {
        let path = self.path_for(name)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn list_refs(&self, prefix: &str) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for special in [HEAD, MERGE_HEAD] {
            if self.handle.ref_path(special).is_file() {
                names.push(special.to_string());
            }
        }

        let control = self.handle.control_dir();
        let refs_dir = control.join("refs");
        if refs_dir.is_dir() {
            for entry in WalkDir::new(&refs_dir) {
                let entry = entry.map_err(io::Error::from)?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let Ok(relative) = entry.path().strip_prefix(&control) else {
                    continue;
                };
                let name: Vec<&str> = relative
                    .components()
                    .filter_map(|c| c.as_os_str().to_str())
                    .collect();
                names.push(name.join("/"));
            }
        }

        names.retain(|name| name.starts_with(prefix));
        names.sort();
        Ok(names)
    }
}
