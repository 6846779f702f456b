//! Path-level comparison of file sets.

use std::collections::BTreeMap;

use gpgit_index::{FileSet, FileStatus, StatusEntry};
use gpgit_types::ObjectId;

/// Full outer join of `N` file sets by path, sorted by path.
///
/// Slot `i` of each row holds the blob id from `sets[i]`, or `None` when
/// that set lacks the path.
pub fn outer_join<const N: usize>(sets: [&FileSet; N]) -> Vec<(String, [Option<ObjectId>; N])> {
    let mut joined: BTreeMap<String, [Option<ObjectId>; N]> = BTreeMap::new();
    for (slot, set) in sets.iter().enumerate() {
        for (path, id) in set.iter() {
            joined.entry(path.clone()).or_insert([None; N])[slot] = Some(*id);
        }
    }
    joined.into_iter().collect()
}

/// Two-way outer join: `(path, id in a, id in b)` for every path in either.
pub fn diff_file_sets(a: &FileSet, b: &FileSet) -> Vec<(String, Option<ObjectId>, Option<ObjectId>)> {
    outer_join([a, b])
        .into_iter()
        .map(|(path, [left, right])| (path, left, right))
        .collect()
}

/// Paths whose blob differs between `from` and `to`, classified.
pub fn changed_files(from: &FileSet, to: &FileSet) -> Vec<StatusEntry> {
    diff_file_sets(from, to)
        .into_iter()
        .filter_map(|(path, old, new)| {
            let status = match (old, new) {
                (None, Some(_)) => FileStatus::New,
                (Some(_), None) => FileStatus::Deleted,
                (Some(old), Some(new)) if old != new => FileStatus::Modified,
                _ => return None,
            };
            Some(StatusEntry::new(path, status))
        })
        .collect()
}
