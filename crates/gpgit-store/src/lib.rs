//! Content-addressed object storage for gpgit.
//!
//! Every object is stored as `kind || 0x00 || payload` and identified by the
//! SHA-1 of exactly those bytes, the same layout git uses for loose objects.
//!
//! # Object Types
//!
//! - blobs: raw file contents
//! - [`Tree`]: sorted directory listing, one `"type id name\n"` line per entry
//! - [`Commit`]: tree id, parent ids and a free-text message
//!
//! # Storage Backends
//!
//! All backends implement the [`ObjectStore`] trait:
//!
//! - [`FsObjectStore`]: one file per object under `<control>/objects/`
//! - [`InMemoryObjectStore`]: `HashMap`-based store for tests

pub mod commit;
pub mod error;
pub mod fs;
pub mod memory;
pub mod object;
pub mod traits;
pub mod tree;

pub use commit::Commit;
pub use error::{StoreError, StoreResult};
pub use fs::FsObjectStore;
pub use memory::InMemoryObjectStore;
pub use object::StoredObject;
pub use traits::{copy_object, ObjectStore};
pub use tree::{Tree, TreeEntry};
