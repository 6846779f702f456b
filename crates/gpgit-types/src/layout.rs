use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::object::ObjectId;

/// Name of the control directory when no configuration overrides it.
pub const DEFAULT_CONTROL_DIR: &str = ".gpgit";

/// Location of one repository on disk.
///
/// The handle is passed explicitly to every store and ref backend; there is
/// no process-wide "current repository". Remote sync simply opens a second
/// handle for the remote root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepositoryHandle {
    root: PathBuf,
    control_dir: String,
}

impl RepositoryHandle {
    /// Handle for `root` with a custom control directory name.
    pub fn new(root: impl Into<PathBuf>, control_dir: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            control_dir: control_dir.into(),
        }
    }

    /// Handle for `root` using [`DEFAULT_CONTROL_DIR`].
    pub fn with_default_control_dir(root: impl Into<PathBuf>) -> Self {
        Self::new(root, DEFAULT_CONTROL_DIR)
    }

    /// The working directory root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Bare name of the control directory (e.g. `.gpgit`).
    pub fn control_dir_name(&self) -> &str {
        &self.control_dir
    }

    /// Absolute path of the control directory.
    pub fn control_dir(&self) -> PathBuf {
        self.root.join(&self.control_dir)
    }

    pub fn objects_dir(&self) -> PathBuf {
        self.control_dir().join("objects")
    }

    pub fn object_path(&self, id: &ObjectId) -> PathBuf {
        self.objects_dir().join(id.to_hex())
    }

    /// Path of a ref file. `name` uses `/` separators (`refs/heads/master`).
    pub fn ref_path(&self, name: &str) -> PathBuf {
        let mut path = self.control_dir();
        path.extend(name.split('/'));
        path
    }

    pub fn index_path(&self) -> PathBuf {
        self.control_dir().join("index")
    }

    pub fn config_path(&self) -> PathBuf {
        self.control_dir().join("config.toml")
    }

    /// Whether the control directory exists.
    pub fn is_initialized(&self) -> bool {
        self.control_dir().is_dir()
    }

    /// Ignore predicate for working-tree operations.
    ///
    /// A path is ignored when any of its components equals the control
    /// directory name. Absolute paths are judged relative to the root.
    pub fn is_ignored(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        relative
            .components()
            .any(|c| c.as_os_str() == OsStr::new(&self.control_dir))
    }
}
