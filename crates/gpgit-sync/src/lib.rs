//! Synchronization between gpgit repositories.
//!
//! A remote is just another repository directory reachable through the
//! filesystem. Both sides are accessed through an [`Endpoint`], a pair of
//! object and ref stores, so the same code syncs on-disk repositories and
//! in-memory test fixtures.
//!
//! - [`pull`] copies every object reachable from the remote's branches and
//!   records their positions under `refs/remote/`.
//! - [`push`] sends the objects the remote lacks and moves one remote ref,
//!   refusing anything that is not a fast-forward.

pub mod endpoint;
pub mod error;
pub mod negotiation;
pub mod pull;
pub mod push;
pub mod types;

pub use endpoint::{Endpoint, FsRemote};
pub use error::{SyncError, SyncResult};
pub use negotiation::{negotiate_push, Negotiation};
pub use pull::pull;
pub use push::push;
pub use types::{FetchResult, PushResult, RefUpdate};

#[cfg(test)]
mod fixtures;
