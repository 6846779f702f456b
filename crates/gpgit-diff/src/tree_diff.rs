//! Rendering the content differences between two file sets.

use gpgit_index::FileSet;
use gpgit_store::ObjectStore;
use gpgit_types::{ObjectId, ObjectKind};

use crate::blob_diff::diff_blobs;
use crate::error::DiffResult;
use crate::file_sets::diff_file_sets;

fn load(store: &dyn ObjectStore, id: Option<ObjectId>) -> DiffResult<Vec<u8>> {
    match id {
        Some(id) => Ok(store.get(&id, Some(ObjectKind::Blob))?),
        None => Ok(Vec::new()),
    }
}

/// Unified diff of every path whose blob differs between `from` and `to`.
///
/// Missing sides are diffed as empty files against `/dev/null`. Every blob
/// on either side must be readable from `store`.
pub fn diff_trees(store: &dyn ObjectStore, from: &FileSet, to: &FileSet) -> DiffResult<String> {
    let mut out = String::new();
    for (path, old, new) in diff_file_sets(from, to) {
        if old == new {
            continue;
        }
        let old_label = if old.is_some() {
            format!("a/{path}")
        } else {
            "/dev/null".to_string()
        };
        let new_label = if new.is_some() {
            format!("b/{path}")
        } else {
            "/dev/null".to_string()
        };
        let diff = diff_blobs(&load(store, old)?, &load(store, new)?, &old_label, &new_label);
        out.push_str(&format!("diff a/{path} b/{path}\n"));
        out.push_str(&diff.text);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpgit_store::InMemoryObjectStore;

    fn put(store: &InMemoryObjectStore, content: &str) -> ObjectId {
        store.put(content.as_bytes(), ObjectKind::Blob).unwrap()
    }

    #[test]
    fn renders_only_changed_paths() {
        let store = InMemoryObjectStore::new();
        let mut from = FileSet::new();
        from.insert("keep.txt".into(), put(&store, "same\n"));
        from.insert("edit.txt".into(), put(&store, "old\n"));
        let mut to = from.clone();
        to.insert("edit.txt".into(), put(&store, "new\n"));
        to.insert("add.txt".into(), put(&store, "added\n"));

        let text = diff_trees(&store, &from, &to).unwrap();
        assert!(text.contains("diff a/edit.txt b/edit.txt\n"));
        assert!(text.contains("-old\n+new\n"));
        assert!(text.contains("--- /dev/null\n+++ b/add.txt\n"));
        assert!(!text.contains("keep.txt"));
    }

    #[test]
    fn identical_sets_render_nothing() {
        let store = InMemoryObjectStore::new();
        let mut files = FileSet::new();
        files.insert("a".into(), put(&store, "a"));
        assert!(diff_trees(&store, &files, &files).unwrap().is_empty());
    }
}
