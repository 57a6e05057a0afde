//! Filesystem-backed object store.
//!
//! Objects are plain files below a root directory; the object key is the
//! relative path. This mirrors a bucket synced to local disk.

use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::trace;

use super::traits::{BoxFuture, ObjectMeta, ObjectStore, StorageError};

/// Object store reading files from a root directory.
#[derive(Debug, Clone)]
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    /// Create a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map an object key to a file path under the root.
    ///
    /// Keys must be relative and may only contain normal path components,
    /// so a key can never address a file outside the root.
    pub fn object_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        let relative = Path::new(key);
        let all_normal = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !all_normal {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        Ok(self.root.join(relative))
    }
}

impl ObjectStore for DiskStore {
    fn get(&self, key: &str) -> BoxFuture<'_, Result<Option<Vec<u8>>, StorageError>> {
        let path = self.object_path(key);
        Box::pin(async move {
            let path = path?;
            trace!(path = %path.display(), "Reading object");
            match tokio::fs::read(&path).await {
                Ok(bytes) => Ok(Some(bytes)),
                Err(e) if is_missing(&e) => Ok(None),
                Err(e) => Err(StorageError::Io(e)),
            }
        })
    }

    fn head(&self, key: &str) -> BoxFuture<'_, Result<Option<ObjectMeta>, StorageError>> {
        let key = key.to_string();
        let path = self.object_path(&key);
        Box::pin(async move {
            let path = path?;
            match tokio::fs::metadata(&path).await {
                Ok(meta) if meta.is_file() => Ok(Some(ObjectMeta {
                    key,
                    size: meta.len(),
                })),
                Ok(_) => Ok(None),
                Err(e) if is_missing(&e) => Ok(None),
                Err(e) => Err(StorageError::Io(e)),
            }
        })
    }

    fn name(&self) -> &str {
        "disk"
    }
}

fn is_missing(e: &io::Error) -> bool {
    e.kind() == io::ErrorKind::NotFound
}
