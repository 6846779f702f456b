//! Conversion between flat path mappings and nested tree objects.

use std::collections::{btree_map, BTreeMap};
use std::mem;

use gpgit_store::{ObjectStore, Tree, TreeEntry};
use gpgit_types::{ObjectId, ObjectKind};
use tracing::debug;

use crate::error::{IndexError, IndexResult};
use crate::index::{validate_path, FileSet, Index};

enum Node {
    Blob(ObjectId),
    Dir(BTreeMap<String, Node>),
}

/// A trie of path segments waiting to be written as tree objects.
#[derive(Default)]
pub struct TreeBuilder {
    root: BTreeMap<String, Node>,
}

/// One directory level on the post-order stack. The root's name is empty.
struct Frame {
    name: String,
    pending: btree_map::IntoIter<String, Node>,
    entries: Vec<TreeEntry>,
}

impl Frame {
    fn new(name: String, children: BTreeMap<String, Node>) -> Self {
        Self {
            name,
            pending: children.into_iter(),
            entries: Vec::new(),
        }
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a blob at a `/`-separated path.
    ///
    /// Fails if a path is used both as a file and as a directory.
    pub fn insert(&mut self, path: &str, id: ObjectId) -> IndexResult<()> {
        validate_path(path)?;
        let conflict = || IndexError::InvalidPath {
            path: path.to_string(),
            reason: "used both as a file and as a directory".into(),
        };

        let mut segments: Vec<&str> = path.split('/').collect();
        let Some(file_name) = segments.pop() else {
            return Err(conflict());
        };
        let mut level = &mut self.root;
        for segment in segments {
            let node = level
                .entry(segment.to_string())
                .or_insert_with(|| Node::Dir(BTreeMap::new()));
            level = match node {
                Node::Dir(children) => children,
                Node::Blob(_) => return Err(conflict()),
            };
        }
        if let Some(Node::Dir(_)) = level.get(file_name) {
            return Err(conflict());
        }
        level.insert(file_name.to_string(), Node::Blob(id));
        Ok(())
    }

    /// Write every directory level bottom-up and return the root tree id.
    ///
    /// Uses an explicit stack instead of recursion, so nesting depth is
    /// bounded only by memory.
    pub fn write(self, store: &dyn ObjectStore) -> IndexResult<ObjectId> {
        let mut current = Frame::new(String::new(), self.root);
        let mut parents: Vec<Frame> = Vec::new();
        loop {
            match current.pending.next() {
                Some((name, Node::Blob(id))) => current.entries.push(TreeEntry::blob(name, id)),
                Some((name, Node::Dir(children))) => {
                    parents.push(mem::replace(&mut current, Frame::new(name, children)));
                }
                None => {
                    let id = store.put_tree(&Tree::new(mem::take(&mut current.entries)))?;
                    let Some(parent) = parents.pop() else {
                        return Ok(id);
                    };
                    let done = mem::replace(&mut current, parent);
                    current.entries.push(TreeEntry::tree(done.name, id));
                }
            }
        }
    }
}

/// Store the index as nested tree objects and return the root tree id.
///
/// An empty index yields the id of the empty tree.
pub fn write_tree(index: &Index, store: &dyn ObjectStore) -> IndexResult<ObjectId> {
    let mut builder = TreeBuilder::new();
    for (path, id) in index.iter() {
        builder.insert(path, *id)?;
    }
    let root = builder.write(store)?;
    debug!(tree = %root.short_hex(), entries = index.len(), "wrote tree");
    Ok(root)
}

/// Flatten a tree into a `path -> blob id` mapping.
///
/// Every path is prefixed with `base_path`, which should be empty or end
/// with `/`.
pub fn read_tree(store: &dyn ObjectStore, tree_id: &ObjectId, base_path: &str) -> IndexResult<FileSet> {
    let mut files = FileSet::new();
    let mut pending = vec![(*tree_id, base_path.to_string())];
    while let Some((id, prefix)) = pending.pop() {
        for entry in store.get_tree(&id)?.into_entries() {
            let path = format!("{prefix}{}", entry.name);
            match entry.kind {
                ObjectKind::Tree => pending.push((entry.id, format!("{path}/"))),
                _ => {
                    files.insert(path, entry.id);
                }
            }
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpgit_store::InMemoryObjectStore;
    use proptest::prelude::*;

    fn staged(store: &InMemoryObjectStore, files: &[(&str, &[u8])]) -> Index {
        let mut index = Index::new();
        for (path, content) in files {
            let id = store.put(content, ObjectKind::Blob).unwrap();
            index.insert(path, id).unwrap();
        }
        index
    }

    #[test]
    fn empty_index_is_empty_tree() {
        let store = InMemoryObjectStore::new();
        let id = write_tree(&Index::new(), &store).unwrap();
        assert_eq!(id, ObjectId::hash(ObjectKind::Tree, b""));
        assert!(read_tree(&store, &id, "").unwrap().is_empty());
    }

    #[test]
    fn nested_paths_become_subtrees() {
        let store = InMemoryObjectStore::new();
        let index = staged(
            &store,
            &[("a.txt", b"a"), ("dir/b.txt", b"b"), ("dir/sub/c.txt", b"c")],
        );
        let root_id = write_tree(&index, &store).unwrap();

        let root = store.get_tree(&root_id).unwrap();
        assert_eq!(root.len(), 2);
        assert_eq!(root.get("a.txt").unwrap().kind, ObjectKind::Blob);
        let dir = root.get("dir").unwrap();
        assert_eq!(dir.kind, ObjectKind::Tree);
        let dir_tree = store.get_tree(&dir.id).unwrap();
        assert_eq!(dir_tree.get("sub").unwrap().kind, ObjectKind::Tree);
    }

    #[test]
    fn read_tree_inverts_write_tree() {
        let store = InMemoryObjectStore::new();
        let index = staged(
            &store,
            &[("x/y/z.txt", b"deep"), ("x/w.txt", b"w"), ("top.txt", b"top")],
        );
        let root = write_tree(&index, &store).unwrap();
        assert_eq!(&read_tree(&store, &root, "").unwrap(), index.entries());
    }

    #[test]
    fn base_path_prefixes_entries() {
        let store = InMemoryObjectStore::new();
        let index = staged(&store, &[("f.txt", b"f")]);
        let root = write_tree(&index, &store).unwrap();
        let files = read_tree(&store, &root, "prefix/").unwrap();
        assert!(files.contains_key("prefix/f.txt"));
    }

    #[test]
    fn file_and_directory_clash() {
        let mut builder = TreeBuilder::new();
        builder.insert("a", ObjectId::from_hash([1; 20])).unwrap();
        assert!(builder.insert("a/b", ObjectId::from_hash([2; 20])).is_err());

        let mut builder = TreeBuilder::new();
        builder.insert("a/b", ObjectId::from_hash([2; 20])).unwrap();
        assert!(builder.insert("a", ObjectId::from_hash([1; 20])).is_err());
    }

    #[test]
    fn entries_after_a_closed_directory_land_in_the_parent() {
        let store = InMemoryObjectStore::new();
        let index = staged(
            &store,
            &[("a/b/c.txt", b"c"), ("a/d.txt", b"d"), ("a/e/f.txt", b"f"), ("z.txt", b"z")],
        );
        let root = store.get_tree(&write_tree(&index, &store).unwrap()).unwrap();
        let names: Vec<&str> = root.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a", "z.txt"]);

        let a = store.get_tree(&root.get("a").unwrap().id).unwrap();
        let names: Vec<&str> = a.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["b", "d.txt", "e"]);
    }

    #[test]
    fn deep_nesting_does_not_recurse() {
        let store = InMemoryObjectStore::new();
        let path = vec!["d"; 2000].join("/") + "/leaf.txt";
        let index = staged(&store, &[(path.as_str(), b"leaf")]);
        let root = write_tree(&index, &store).unwrap();
        let files = read_tree(&store, &root, "").unwrap();
        assert_eq!(files.keys().next().unwrap(), &path);
    }

    #[test]
    fn read_tree_rejects_dot_dot_entries() {
        let store = InMemoryObjectStore::new();
        let blob = store.put(b"x", ObjectKind::Blob).unwrap();
        let raw = format!("blob {blob} ..\n");
        let bad = store.put(raw.as_bytes(), ObjectKind::Tree).unwrap();
        assert!(matches!(
            read_tree(&store, &bad, ""),
            Err(IndexError::Store(gpgit_store::StoreError::MalformedTree { .. }))
        ));
    }

    proptest! {
        #[test]
        fn tree_roundtrip(
            files in proptest::collection::btree_map(
                "[a-c]{1,3}(/[a-c]{1,3}){0,3}\\.txt",
                proptest::collection::vec(any::<u8>(), 0..16),
                0..16,
            )
        ) {
            let store = InMemoryObjectStore::new();
            let mut index = Index::new();
            for (path, content) in &files {
                let id = store.put(content, ObjectKind::Blob).unwrap();
                index.insert(path, id).unwrap();
            }
            let root = write_tree(&index, &store).unwrap();
            prop_assert_eq!(&read_tree(&store, &root, "").unwrap(), index.entries());
        }
    }
}
