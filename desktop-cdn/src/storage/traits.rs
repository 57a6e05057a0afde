//! Core traits for the object storage collaborator.
//!
//! The `ObjectStore` trait is the only way the resolver reads bytes. It is a
//! read-only, key-addressed interface over whatever bucket holds the
//! registries, manifests and installers.
//!
//! # Design Principles
//!
//! - **String keys**: Object keys exactly as they appear in the bucket
//! - **Vec<u8> values**: Raw bytes, decoding is the caller's concern
//! - **Absence is not an error**: Missing objects return `Ok(None)`
//! - **Dyn-compatible**: Uses `Pin<Box<dyn Future>>` for trait object support

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

/// Errors that can occur while reading from an object store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// I/O error reading a local object.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key cannot be mapped to an object location.
    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    /// Remote store answered with an error or the transport failed.
    #[error("HTTP error for {key}: {reason}")]
    Http { key: String, reason: String },

    /// Remote store did not answer in time.
    #[error("Request for {key} timed out")]
    Timeout { key: String },

    /// HTTP client could not be constructed.
    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}

/// Metadata returned by a `head` lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectMeta {
    /// The object key.
    pub key: String,
    /// Object size in bytes (0 if the backend cannot tell).
    pub size: u64,
}

/// Boxed future type for dyn-compatible async methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Read-only object storage interface.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`. A single store is shared
/// across concurrent resolutions as `Arc<dyn ObjectStore>`.
pub trait ObjectStore: Send + Sync {
    /// Fetch an object's bytes.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(data))` if the object exists
    /// - `Ok(None)` if it does not
    /// - `Err(_)` if the backend failed
    fn get(&self, key: &str) -> BoxFuture<'_, Result<Option<Vec<u8>>, StorageError>>;

    /// Check an object's existence without fetching its body.
    fn head(&self, key: &str) -> BoxFuture<'_, Result<Option<ObjectMeta>, StorageError>>;

    /// Short backend name used in log events.
    fn name(&self) -> &str;
}
