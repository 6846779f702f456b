use gpgit_refs::{RefStore, RefValue, HEAD, MERGE_HEAD};
use gpgit_store::{Commit, ObjectStore};
use gpgit_types::ObjectId;
use tracing::info;

use crate::error::DagResult;

/// Record `tree` as a new commit on top of `HEAD`.
///
/// Parents are the current `HEAD` commit (if any) followed by `MERGE_HEAD`
/// (if a merge is pending). `HEAD` is updated through its symbolic chain so
/// the current branch advances, and `MERGE_HEAD` is removed once the merge
/// commit exists.
pub fn commit(
    message: &str,
    tree: ObjectId,
    store: &dyn ObjectStore,
    refs: &dyn RefStore,
) -> DagResult<ObjectId> {
    let mut parents = Vec::with_capacity(2);
    if let Some(head) = refs.value_of(HEAD)? {
        parents.push(head);
    }
    let merge_head = refs.value_of(MERGE_HEAD)?;
    parents.extend(merge_head);

    let id = store.put_commit(&Commit::new(tree, parents, message))?;
    refs.update(HEAD, RefValue::Direct(id), true)?;
    if merge_head.is_some() {
        refs.delete(MERGE_HEAD, false)?;
    }

    info!(
        commit = %id.short_hex(),
        tree = %tree.short_hex(),
        merge = merge_head.is_some(),
        "created commit"
    );
    Ok(id)
}
