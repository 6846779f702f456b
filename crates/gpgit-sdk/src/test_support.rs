use std::fs;
use std::path::{Path, PathBuf};

use gpgit_types::ObjectId;
use tempfile::TempDir;

use crate::repository::Repository;

pub(crate) fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// A freshly initialized repository in a temporary directory.
pub(crate) struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        Self { dir, repo }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write one file, stage it and commit.
    pub fn commit_file(&self, relative: &str, content: &str, message: &str) -> ObjectId {
        write(self.root(), relative, content);
        self.repo.stage(&[PathBuf::from(relative)]).unwrap();
        self.repo.commit(message).unwrap()
    }
}
