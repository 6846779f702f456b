//! Working directory access: scanning, staging and materializing files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use gpgit_store::ObjectStore;
use gpgit_types::{ObjectId, ObjectKind, RepositoryHandle};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::{IndexError, IndexResult};
use crate::index::{FileSet, Index};

/// The working directory of one repository.
///
/// Everything under a path component equal to the control directory name
/// is ignored by every operation here.
#[derive(Debug, Clone, Copy)]
pub struct WorkingTree<'a> {
    handle: &'a RepositoryHandle,
}

impl<'a> WorkingTree<'a> {
    pub fn new(handle: &'a RepositoryHandle) -> Self {
        Self { handle }
    }

    fn walk(&self, dir: &Path) -> impl Iterator<Item = walkdir::Result<DirEntry>> + 'a {
        let handle = self.handle;
        WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| !handle.is_ignored(entry.path()))
    }

    /// Repository-relative `/`-separated form of `path`.
    pub fn relative_path(&self, path: &Path) -> IndexResult<String> {
        let relative = path
            .strip_prefix(self.handle.root())
            .map_err(|_| IndexError::OutsideRepository(path.to_path_buf()))?;
        let mut segments = Vec::new();
        for component in relative.components() {
            let segment = component.as_os_str().to_str().ok_or_else(|| IndexError::InvalidPath {
                path: relative.display().to_string(),
                reason: "not valid UTF-8".into(),
            })?;
            segments.push(segment);
        }
        Ok(segments.join("/"))
    }

    fn files(&self) -> IndexResult<Vec<(String, PathBuf)>> {
        let mut files = Vec::new();
        for entry in self.walk(self.handle.root()) {
            let entry = entry.map_err(io::Error::from)?;
            if entry.file_type().is_file() {
                files.push((self.relative_path(entry.path())?, entry.into_path()));
            }
        }
        Ok(files)
    }

    /// Blob ids of every non-ignored file, without storing anything.
    pub fn scan(&self) -> IndexResult<FileSet> {
        let mut result = FileSet::new();
        for (relative, path) in self.files()? {
            let content = fs::read(&path)?;
            result.insert(relative, ObjectId::hash(ObjectKind::Blob, &content));
        }
        Ok(result)
    }

    /// Like [`scan`](Self::scan), but also writes every file as a blob so
    /// the contents can be read back later (e.g. for diffs).
    pub fn snapshot(&self, store: &dyn ObjectStore) -> IndexResult<FileSet> {
        let mut result = FileSet::new();
        for (relative, path) in self.files()? {
            let content = fs::read(&path)?;
            result.insert(relative, store.put(&content, ObjectKind::Blob)?);
        }
        Ok(result)
    }

    /// Stage files and directories (recursively) into `index`.
    ///
    /// Relative paths are taken relative to the repository root. Returns
    /// the number of files staged.
    pub fn stage(
        &self,
        index: &mut Index,
        paths: &[PathBuf],
        store: &dyn ObjectStore,
    ) -> IndexResult<usize> {
        let mut staged = 0;
        for path in paths {
            let path = if path.is_absolute() {
                path.clone()
            } else {
                self.handle.root().join(path)
            };
            if self.handle.is_ignored(&path) {
                continue;
            }
            if path.is_file() {
                self.stage_file(index, &path, store)?;
                staged += 1;
            } else if path.is_dir() {
                for entry in self.walk(&path) {
                    let entry = entry.map_err(io::Error::from)?;
                    if entry.file_type().is_file() {
                        self.stage_file(index, entry.path(), store)?;
                        staged += 1;
                    }
                }
            } else {
                return Err(IndexError::PathNotFound(path));
            }
        }
        Ok(staged)
    }

    fn stage_file(&self, index: &mut Index, path: &Path, store: &dyn ObjectStore) -> IndexResult<()> {
        let relative = self.relative_path(path)?;
        let id = store.put(&fs::read(path)?, ObjectKind::Blob)?;
        debug!(path = %relative, blob = %id.short_hex(), "staged file");
        index.insert(&relative, id)
    }

    /// Remove every non-ignored file, then prune directories left empty.
    pub fn clear(&self) -> IndexResult<()> {
        let root = self.handle.root();
        let mut dirs = Vec::new();
        for entry in self.walk(root) {
            let entry = entry.map_err(io::Error::from)?;
            if entry.depth() == 0 {
                continue;
            }
            if entry.file_type().is_dir() {
                dirs.push(entry.into_path());
            } else {
                fs::remove_file(entry.path())?;
            }
        }
        // Deepest directories first.
        for dir in dirs.iter().rev() {
            if let Err(e) = fs::remove_dir(dir) {
                warn!(dir = %dir.display(), error = %e, "could not remove directory");
            }
        }
        Ok(())
    }

    /// Replace the working directory contents with `files`.
    pub fn materialize(&self, files: &FileSet, store: &dyn ObjectStore) -> IndexResult<()> {
        self.clear()?;
        for (relative, id) in files {
            let mut path = self.handle.root().to_path_buf();
            path.extend(relative.split('/'));
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, store.get(id, Some(ObjectKind::Blob))?)?;
        }
        debug!(files = files.len(), "materialized working tree");
        Ok(())
    }
}
