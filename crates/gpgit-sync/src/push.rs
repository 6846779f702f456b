use gpgit_dag::CommitGraph;
use gpgit_refs::RefValue;
use gpgit_store::copy_object;
use tracing::info;

use crate::endpoint::Endpoint;
use crate::error::{SyncError, SyncResult};
use crate::negotiation::negotiate_push;
use crate::types::{PushResult, RefUpdate};

/// Publish the local value of `refname` to the remote.
///
/// The remote's current value, if any, must be an ancestor of the local
/// value; otherwise the push is rejected before anything is written.
/// Objects are copied first and the remote ref is moved last.
pub fn push(local: Endpoint<'_>, remote: Endpoint<'_>, refname: &str) -> SyncResult<PushResult> {
    let local_tip = local
        .refs
        .value_of(refname)?
        .ok_or_else(|| SyncError::NothingToPush(refname.to_string()))?;

    let remote_refs = remote.refs.list("")?;
    let remote_tip = remote_refs
        .iter()
        .find(|(name, _)| name == refname)
        .map(|(_, id)| *id);

    if let Some(remote_tip) = remote_tip {
        if !CommitGraph::new(local.objects).is_ancestor(remote_tip, local_tip)? {
            return Err(SyncError::NonFastForwardRejected {
                refname: refname.to_string(),
                remote: remote_tip,
                local: local_tip,
            });
        }
    }

    let remote_tips: Vec<_> = remote_refs.iter().map(|(_, id)| *id).collect();
    let negotiation = negotiate_push(local, &remote_tips, local_tip)?;
    for id in &negotiation.wants {
        copy_object(id, local.objects, remote.objects)?;
    }
    remote
        .refs
        .update(refname, RefValue::Direct(local_tip), true)?;

    info!(
        refname,
        tip = %local_tip.short_hex(),
        objects = negotiation.wants.len(),
        "push complete"
    );
    Ok(PushResult {
        objects_copied: negotiation.wants.len(),
        update: RefUpdate {
            name: refname.to_string(),
            old: remote_tip,
            new: local_tip,
        },
    })
}
