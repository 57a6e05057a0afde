//! In-memory object store using dashmap.
//!
//! Holds a snapshot of a bucket in a concurrent map. Tests seed it with
//! registries and manifests.

use dashmap::DashMap;

use super::traits::{BoxFuture, ObjectMeta, ObjectStore, StorageError};

/// In-memory object store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: DashMap<String, Vec<u8>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an object.
    pub fn put(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.objects.insert(key.into(), value.into());
    }

    /// Insert or replace an object, builder style.
    pub fn with_object(self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.put(key, value);
        self
    }
}

impl ObjectStore for MemoryStore {
    fn get(&self, key: &str) -> BoxFuture<'_, Result<Option<Vec<u8>>, StorageError>> {
        let value = self.objects.get(key).map(|entry| entry.value().clone());
        Box::pin(async move { Ok(value) })
    }

    fn head(&self, key: &str) -> BoxFuture<'_, Result<Option<ObjectMeta>, StorageError>> {
        let meta = self.objects.get(key).map(|entry| ObjectMeta {
            key: entry.key().clone(),
            size: entry.value().len() as u64,
        });
        Box::pin(async move { Ok(meta) })
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_get_and_head() {
        let store = MemoryStore::new().with_object("app/latest.yml", "version: 1.0.0");

        let value = store.get("app/latest.yml").await.unwrap();
        assert_eq!(value, Some(b"version: 1.0.0".to_vec()));

        let meta = store.head("app/latest.yml").await.unwrap().unwrap();
        assert_eq!(meta.key, "app/latest.yml");
        assert_eq!(meta.size, 14);
    }

    #[tokio::test]
    async fn test_memory_store_missing() {
        let store = MemoryStore::new();
        assert!(store.get("nope").await.unwrap().is_none());
        assert!(store.head("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_store_put_replaces() {
        let store = MemoryStore::new();
        store.put("k", vec![1]);
        store.put("k", vec![2, 3]);
        assert_eq!(store.get("k").await.unwrap(), Some(vec![2, 3]));
        assert_eq!(store.head("k").await.unwrap().unwrap().size, 2);
    }
}
