//! Object storage collaborator.
//!
//! The resolver never talks to a storage provider directly; it reads through
//! the [`ObjectStore`] trait. Three backends are provided:
//!
//! - [`MemoryStore`]: concurrent in-memory map, used by tests and dry runs
//! - [`DiskStore`]: files below a root directory
//! - [`HttpStore`]: a bucket reachable over HTTP(S)
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use desktop_cdn::storage::{MemoryStore, ObjectStore};
//!
//! let store: Arc<dyn ObjectStore> = Arc::new(
//!     MemoryStore::new().with_object("desktop-releases.json", r#"{"latestReleaseBuildId":"b1"}"#),
//! );
//! assert_eq!(store.name(), "memory");
//! ```

mod disk;
mod http;
mod memory;
mod traits;

pub use disk::DiskStore;
pub use http::{HttpStore, DEFAULT_TIMEOUT_SECS};
pub use memory::MemoryStore;
pub use traits::{BoxFuture, ObjectMeta, ObjectStore, StorageError};
