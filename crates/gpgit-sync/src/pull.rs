use gpgit_dag::CommitGraph;
use gpgit_refs::{RefValue, HEADS_PREFIX, REMOTE_PREFIX};
use gpgit_store::copy_object;
use tracing::{debug, info};

use crate::endpoint::Endpoint;
use crate::error::SyncResult;
use crate::types::{FetchResult, RefUpdate};

/// Bring the remote's branches into `local`.
///
/// Copies every object reachable from the remote's `refs/heads/*` that the
/// local store lacks, then points `refs/remote/<branch>` at each remote
/// branch tip. Local branches and the remote are never modified.
pub fn pull(local: Endpoint<'_>, remote: Endpoint<'_>) -> SyncResult<FetchResult> {
    let branches = remote.refs.list(HEADS_PREFIX)?;
    let objects =
        CommitGraph::new(remote.objects).reachable_objects(branches.iter().map(|(_, id)| *id))?;

    let mut result = FetchResult::default();
    for id in &objects {
        if !local.objects.exists(id)? {
            copy_object(id, remote.objects, local.objects)?;
            result.objects_copied += 1;
        }
    }

    for (name, id) in branches {
        let Some(branch) = name.strip_prefix(HEADS_PREFIX) else {
            continue;
        };
        let tracking = format!("{REMOTE_PREFIX}{branch}");
        let old = local.refs.value_of(&tracking)?;
        local.refs.update(&tracking, RefValue::Direct(id), true)?;
        debug!(tracking = %tracking, tip = %id.short_hex(), "updated remote-tracking ref");
        result.refs_updated.push(RefUpdate {
            name: tracking,
            old,
            new: id,
        });
    }

    info!(
        objects = result.objects_copied,
        refs = result.refs_updated.len(),
        "pull complete"
    );
    Ok(result)
}
