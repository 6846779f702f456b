use std::path::Path;

use gpgit_refs::HEADS_PREFIX;
use gpgit_sync::{pull, push, Endpoint, FetchResult, FsRemote, PushResult};

use crate::error::SdkResult;
use crate::repository::Repository;

impl Repository {
    fn local_endpoint(&self) -> Endpoint<'_> {
        Endpoint::new(&self.objects, &self.refs)
    }

    /// Open the repository at `root` as a remote. It must use the same
    /// control directory name as this one.
    fn open_remote(&self, root: &Path) -> SdkResult<FsRemote> {
        Ok(FsRemote::open(root, self.handle.control_dir_name())?)
    }

    /// Copy the branches of the repository at `remote_root` into
    /// `refs/remote/*`.
    pub fn fetch(&self, remote_root: &Path) -> SdkResult<FetchResult> {
        let remote = self.open_remote(remote_root)?;
        Ok(pull(self.local_endpoint(), remote.endpoint())?)
    }

    /// Publish local branch `branch` to the same branch of the repository
    /// at `remote_root`. Only fast-forward updates are accepted.
    pub fn push(&self, remote_root: &Path, branch: &str) -> SdkResult<PushResult> {
        let remote = self.open_remote(remote_root)?;
        let refname = format!("{HEADS_PREFIX}{branch}");
        Ok(push(self.local_endpoint(), remote.endpoint(), &refname)?)
    }
}
