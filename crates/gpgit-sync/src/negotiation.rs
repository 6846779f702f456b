use std::collections::BTreeSet;

use gpgit_dag::CommitGraph;
use gpgit_types::{ObjectId, ObjectKind};

use crate::endpoint::Endpoint;
use crate::error::SyncResult;

/// What a push has to transfer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Negotiation {
    /// Objects reachable from the local tip that the remote is assumed to lack.
    pub wants: BTreeSet<ObjectId>,
    /// Remote ref targets that are commits in the local store.
    pub common: Vec<ObjectId>,
}

/// Objects reachable from `local_tip` minus everything reachable from the
/// remote tips we already hold.
///
/// Only remote tips that are commits in the local store are used to prune,
/// since the walk runs entirely against the local store. Tags may point at
/// blobs or trees; those tips are skipped.
pub fn negotiate_push(
    local: Endpoint<'_>,
    remote_tips: &[ObjectId],
    local_tip: ObjectId,
) -> SyncResult<Negotiation> {
    let mut common = Vec::new();
    for tip in remote_tips {
        if common.contains(tip) || !local.objects.exists(tip)? {
            continue;
        }
        if local.objects.get_tagged(tip)?.kind == ObjectKind::Commit {
            common.push(*tip);
        }
    }

    let graph = CommitGraph::new(local.objects);
    let known = graph.reachable_objects(common.iter().copied())?;
    let wants = graph
        .reachable_objects([local_tip])?
        .difference(&known)
        .copied()
        .collect();
    Ok(Negotiation { wants, common })
}
