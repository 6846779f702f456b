//! The staging index.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use gpgit_types::ObjectId;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{IndexError, IndexResult};

/// A flat `path -> blob id` mapping, sorted by path.
///
/// Paths are relative to the repository root and use `/` separators.
pub type FileSet = BTreeMap<String, ObjectId>;

/// The staging index: what the next commit's tree will contain.
///
/// Persisted as a JSON object `{path: blob_id}` and always loaded, mutated
/// and saved as a whole.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Index {
    entries: FileSet,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from an existing mapping, validating every path.
    pub fn from_entries(entries: FileSet) -> IndexResult<Self> {
        for path in entries.keys() {
            validate_path(path)?;
        }
        Ok(Self { entries })
    }

    /// Load the index file, or an empty index if it does not exist yet.
    pub fn load(path: &Path) -> IndexResult<Self> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::new()),
            Err(e) => return Err(e.into()),
        };
        let index: Self = serde_json::from_slice(&bytes)?;
        debug!(entries = index.len(), "loaded index");
        Ok(index)
    }

    pub fn save(&self, path: &Path) -> IndexResult<()> {
        fs::write(path, serde_json::to_vec_pretty(self)?)?;
        debug!(entries = self.len(), "saved index");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&ObjectId> {
        self.entries.get(path)
    }

    pub fn entries(&self) -> &FileSet {
        &self.entries
    }

    pub fn into_entries(self) -> FileSet {
        self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ObjectId)> {
        self.entries.iter()
    }

    /// Stage `id` at `path`, replacing any previous entry.
    pub fn insert(&mut self, path: &str, id: ObjectId) -> IndexResult<()> {
        validate_path(path)?;
        self.entries.insert(path.to_string(), id);
        Ok(())
    }

    pub fn remove(&mut self, path: &str) -> Option<ObjectId> {
        self.entries.remove(path)
    }

    /// Replace the whole mapping.
    pub fn replace(&mut self, entries: FileSet) -> IndexResult<()> {
        *self = Self::from_entries(entries)?;
        Ok(())
    }
}

/// Check that `path` is a relative, `/`-separated path without empty, `.`
/// or `..` segments. Line breaks are rejected since tree entries are stored
/// one per line.
pub(crate) fn validate_path(path: &str) -> IndexResult<()> {
    let invalid = |reason: &str| IndexError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    };
    if path.is_empty() {
        return Err(invalid("empty path"));
    }
    if path.contains(['\\', '\0']) {
        return Err(invalid("contains a backslash or NUL"));
    }
    if path.contains(['\n', '\r']) {
        return Err(invalid("contains a line break"));
    }
    if path
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(invalid("empty, '.' or '..' segment"));
    }
    Ok(())
}
