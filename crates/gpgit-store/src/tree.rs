use gpgit_types::{ObjectId, ObjectKind};

use crate::error::{StoreError, StoreResult};

/// A single named entry of a tree: either a blob or a subtree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeEntry {
    pub kind: ObjectKind,
    pub id: ObjectId,
    pub name: String,
}

impl TreeEntry {
    pub fn blob(name: impl Into<String>, id: ObjectId) -> Self {
        Self {
            kind: ObjectKind::Blob,
            id,
            name: name.into(),
        }
    }

    pub fn tree(name: impl Into<String>, id: ObjectId) -> Self {
        Self {
            kind: ObjectKind::Tree,
            id,
            name: name.into(),
        }
    }
}

/// A directory listing.
///
/// Entries are kept sorted by name, so two trees built from the same
/// entries in any order encode to identical bytes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn new(mut entries: Vec<TreeEntry>) -> Self {
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Self { entries }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<TreeEntry> {
        self.entries
    }

    pub fn get(&self, name: &str) -> Option<&TreeEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize as `"type id name\n"` lines. Fails if an entry name could
    /// not be read back.
    pub fn encode(&self) -> StoreResult<Vec<u8>> {
        let mut out = String::new();
        for entry in &self.entries {
            check_name(&entry.name).map_err(|reason| StoreError::MalformedTree {
                entry: entry.name.clone(),
                reason: reason.into(),
            })?;
            out.push_str(entry.kind.as_str());
            out.push(' ');
            out.push_str(&entry.id.to_hex());
            out.push(' ');
            out.push_str(&entry.name);
            out.push('\n');
        }
        Ok(out.into_bytes())
    }

    /// Parse a tree payload.
    ///
    /// Entry names must be single path components: not empty, not `.` or
    /// `..`, and free of `/` and line breaks.
    pub fn decode(data: &[u8]) -> StoreResult<Self> {
        let text = std::str::from_utf8(data).map_err(|_| StoreError::MalformedTree {
            entry: String::from_utf8_lossy(data).into_owned(),
            reason: "tree payload is not UTF-8".into(),
        })?;

        let mut entries = Vec::new();
        for line in text.lines() {
            let malformed = |reason: &str| StoreError::MalformedTree {
                entry: line.to_string(),
                reason: reason.to_string(),
            };
            let mut parts = line.splitn(3, ' ');
            let (Some(kind), Some(id), Some(name)) = (parts.next(), parts.next(), parts.next())
            else {
                return Err(malformed("expected \"type id name\""));
            };
            let kind = match kind {
                "blob" => ObjectKind::Blob,
                "tree" => ObjectKind::Tree,
                _ => return Err(malformed("entry type must be blob or tree")),
            };
            let id = ObjectId::from_hex(id).map_err(|e| malformed(&e.to_string()))?;
            check_name(name).map_err(malformed)?;
            entries.push(TreeEntry {
                kind,
                id,
                name: name.to_string(),
            });
        }
        Ok(Self::new(entries))
    }
}

fn check_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() || name == "." || name == ".." || name.contains('/') {
        return Err("invalid entry name");
    }
    if name.contains(['\n', '\r']) {
        return Err("entry name contains a line break");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn id(n: u8) -> ObjectId {
        ObjectId::from_hash([n; 20])
    }

    #[test]
    fn entries_sorted_by_name() {
        let tree = Tree::new(vec![
            TreeEntry::blob("z.txt", id(1)),
            TreeEntry::tree("a", id(2)),
            TreeEntry::blob("m.txt", id(3)),
        ]);
        let names: Vec<&str> = tree.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a", "m.txt", "z.txt"]);
    }

    #[test]
    fn encoding_is_one_line_per_entry() {
        let tree = Tree::new(vec![TreeEntry::blob("hello.txt", id(0xaa))]);
        let expected = format!("blob {} hello.txt\n", "aa".repeat(20));
        assert_eq!(tree.encode().unwrap(), expected.into_bytes());
    }

    #[test]
    fn empty_tree_encodes_to_nothing() {
        assert!(Tree::empty().encode().unwrap().is_empty());
        assert!(Tree::decode(b"").unwrap().is_empty());
    }

    #[test]
    fn names_may_contain_spaces() {
        let tree = Tree::new(vec![TreeEntry::blob("my file.txt", id(4))]);
        let decoded = Tree::decode(&tree.encode().unwrap()).unwrap();
        assert_eq!(decoded.get("my file.txt").unwrap().id, id(4));
    }

    #[test]
    fn decode_rejects_dot_entries() {
        for name in [".", "..", "a/b"] {
            let line = format!("blob {} {name}\n", id(5));
            let err = Tree::decode(line.as_bytes()).unwrap_err();
            assert!(matches!(err, StoreError::MalformedTree { .. }), "{name}");
        }
    }

    #[test]
    fn encode_rejects_line_breaks_in_names() {
        for name in ["a\nb", "trailing\r", "", "x/y"] {
            let tree = Tree::new(vec![TreeEntry::blob(name, id(7))]);
            assert!(
                matches!(tree.encode(), Err(StoreError::MalformedTree { .. })),
                "{name:?}"
            );
        }
    }

    #[test]
    fn decode_rejects_commit_entries() {
        let line = format!("commit {} sub\n", id(6));
        assert!(matches!(
            Tree::decode(line.as_bytes()),
            Err(StoreError::MalformedTree { .. })
        ));
    }

    #[test]
    fn decode_rejects_short_lines() {
        assert!(Tree::decode(b"blob onlytwo\n").is_err());
    }

    proptest! {
        #[test]
        fn insertion_order_does_not_change_encoding(
            names in proptest::collection::btree_set("[a-z]{1,8}", 1..12)
        ) {
            let forward: Vec<TreeEntry> = names
                .iter()
                .enumerate()
                .map(|(i, n)| TreeEntry::blob(n.clone(), id(i as u8)))
                .collect();
            let mut reversed = forward.clone();
            reversed.reverse();
            prop_assert_eq!(Tree::new(forward).encode().unwrap(), Tree::new(reversed).encode().unwrap());
        }
    }
}
