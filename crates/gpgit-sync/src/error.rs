use std::path::PathBuf;

use gpgit_types::ObjectId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("nothing to push: {0} does not exist locally")]
    NothingToPush(String),

    #[error("rejected non-fast-forward update of {refname}: remote {remote} is not an ancestor of {local}")]
    NonFastForwardRejected {
        refname: String,
        remote: ObjectId,
        local: ObjectId,
    },

    #[error("not a gpgit repository: {0}")]
    NotARepository(PathBuf),

    #[error("store error: {0}")]
    Store(#[from] gpgit_store::StoreError),

    #[error("ref error: {0}")]
    Ref(#[from] gpgit_refs::RefError),

    #[error("graph error: {0}")]
    Dag(#[from] gpgit_dag::DagError),
}

pub type SyncResult<T> = Result<T, SyncError>;
