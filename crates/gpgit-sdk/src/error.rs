use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("not a gpgit repository: {0}")]
    NotARepository(PathBuf),

    #[error("repository already initialized at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("HEAD does not point at a commit yet")]
    NoCommits,

    #[error("config error: {0}")]
    Config(String),

    #[error("store error: {0}")]
    Store(#[from] gpgit_store::StoreError),

    #[error("ref error: {0}")]
    Ref(#[from] gpgit_refs::RefError),

    #[error("index error: {0}")]
    Index(#[from] gpgit_index::IndexError),

    #[error("history error: {0}")]
    Dag(#[from] gpgit_dag::DagError),

    #[error("diff error: {0}")]
    Diff(#[from] gpgit_diff::DiffError),

    #[error("merge error: {0}")]
    Merge(#[from] gpgit_merge::MergeError),

    #[error("sync error: {0}")]
    Sync(#[from] gpgit_sync::SyncError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for SdkError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for SdkError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Config(err.to_string())
    }
}

pub type SdkResult<T> = Result<T, SdkError>;
