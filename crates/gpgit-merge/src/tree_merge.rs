//! Three-way merge of whole file sets.

use gpgit_diff::outer_join;
use gpgit_index::FileSet;
use gpgit_store::ObjectStore;
use gpgit_types::{ObjectId, ObjectKind};
use tracing::{debug, info};

use crate::driver::{MergeDriver, MergeLabels};
use crate::error::MergeResult;

/// Result of merging three file sets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeMerge {
    /// Merged `path -> blob id` mapping, ready to be staged.
    pub files: FileSet,
    /// Paths whose merged blob contains conflict markers, sorted.
    pub conflicts: Vec<String>,
}

impl TreeMerge {
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

fn load(store: &dyn ObjectStore, id: Option<ObjectId>) -> MergeResult<Option<Vec<u8>>> {
    Ok(id
        .map(|id| store.get(&id, Some(ObjectKind::Blob)))
        .transpose()?)
}

/// Merge `ours` and `theirs` against their common `base`.
///
/// Every path present in any of the three sets is passed through `driver`
/// with missing sides as `None`. The driver's output is stored as a new
/// blob and recorded at that path whether or not it conflicted; conflicted
/// paths are also listed in [`TreeMerge::conflicts`].
pub fn merge_trees(
    store: &dyn ObjectStore,
    driver: &dyn MergeDriver,
    labels: &MergeLabels,
    base: &FileSet,
    ours: &FileSet,
    theirs: &FileSet,
) -> MergeResult<TreeMerge> {
    let mut result = TreeMerge::default();
    for (path, [base_id, ours_id, theirs_id]) in outer_join([base, ours, theirs]) {
        let base_data = load(store, base_id)?;
        let ours_data = load(store, ours_id)?;
        let theirs_data = load(store, theirs_id)?;
        let outcome = driver.merge(
            base_data.as_deref(),
            ours_data.as_deref(),
            theirs_data.as_deref(),
            labels,
        )?;
        let id = store.put(&outcome.content, ObjectKind::Blob)?;
        if outcome.conflict {
            debug!(path = %path, "conflict");
            result.conflicts.push(path.clone());
        }
        result.files.insert(path, id);
    }
    info!(
        files = result.files.len(),
        conflicts = result.conflicts.len(),
        "merged trees"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::MergeOutcome;
    use crate::native::NativeMergeDriver;
    use gpgit_store::InMemoryObjectStore;

    fn files(store: &InMemoryObjectStore, entries: &[(&str, &str)]) -> FileSet {
        entries
            .iter()
            .map(|(path, content)| {
                (
                    path.to_string(),
                    store.put(content.as_bytes(), ObjectKind::Blob).unwrap(),
                )
            })
            .collect()
    }

    fn content(store: &InMemoryObjectStore, merged: &TreeMerge, path: &str) -> String {
        let data = store.get(&merged.files[path], Some(ObjectKind::Blob)).unwrap();
        String::from_utf8(data).unwrap()
    }

    /// Returns a fixed payload and always reports a conflict.
    struct AlwaysConflict;

    impl MergeDriver for AlwaysConflict {
        fn merge(
            &self,
            _base: Option<&[u8]>,
            _ours: Option<&[u8]>,
            _theirs: Option<&[u8]>,
            _labels: &MergeLabels,
        ) -> MergeResult<MergeOutcome> {
            Ok(MergeOutcome {
                content: b"<<<<<<< conflict payload".to_vec(),
                conflict: true,
            })
        }
    }

    #[test]
    fn independent_file_changes_combine() {
        let store = InMemoryObjectStore::new();
        let base = files(&store, &[("a.txt", "a\n"), ("b.txt", "b\n")]);
        let ours = files(&store, &[("a.txt", "A\n"), ("b.txt", "b\n")]);
        let theirs = files(&store, &[("a.txt", "a\n"), ("b.txt", "B\n"), ("c.txt", "c\n")]);

        let merged = merge_trees(
            &store,
            &NativeMergeDriver,
            &MergeLabels::default(),
            &base,
            &ours,
            &theirs,
        )
        .unwrap();
        assert!(!merged.has_conflicts());
        assert_eq!(content(&store, &merged, "a.txt"), "A\n");
        assert_eq!(content(&store, &merged, "b.txt"), "B\n");
        assert_eq!(content(&store, &merged, "c.txt"), "c\n");
    }

    #[test]
    fn deleted_file_is_recorded_empty() {
        let store = InMemoryObjectStore::new();
        let base = files(&store, &[("gone.txt", "x\n")]);
        let ours = base.clone();
        let theirs = FileSet::new();
        let merged = merge_trees(
            &store,
            &NativeMergeDriver,
            &MergeLabels::default(),
            &base,
            &ours,
            &theirs,
        )
        .unwrap();
        assert_eq!(content(&store, &merged, "gone.txt"), "");
    }

    #[test]
    fn conflict_content_passes_through() {
        let store = InMemoryObjectStore::new();
        let base = files(&store, &[("f.txt", "base")]);
        let ours = files(&store, &[("f.txt", "ours")]);
        let theirs = files(&store, &[("f.txt", "theirs")]);

        let merged = merge_trees(
            &store,
            &AlwaysConflict,
            &MergeLabels::default(),
            &base,
            &ours,
            &theirs,
        )
        .unwrap();
        assert_eq!(merged.conflicts, vec!["f.txt".to_string()]);
        assert_eq!(content(&store, &merged, "f.txt"), "<<<<<<< conflict payload");
    }
}
