//! HTTP-backed object store.
//!
//! Reads objects from a bucket exposed over HTTP(S), e.g. a public R2 or S3
//! endpoint. `GET {base_url}/{key}` fetches an object, `HEAD` checks it.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode, Url};
use tracing::debug;

use super::traits::{BoxFuture, ObjectMeta, ObjectStore, StorageError};

/// Default timeout for object requests in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent sent with every request.
const USER_AGENT: &str = concat!("desktop-cdn/", env!("CARGO_PKG_VERSION"));

/// Object store reading from a base URL.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpStore {
    /// Create a store with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, StorageError> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a store with a custom per-request timeout.
    ///
    /// The base URL must be hierarchical (`http://` or `https://`, possibly
    /// with a path prefix).
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, StorageError> {
        let raw = base_url.into();
        let base_url = Url::parse(&raw)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| StorageError::Client(format!("invalid base URL '{}'", raw)))?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| StorageError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// The configured request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full URL for an object key.
    ///
    /// Each `/`-separated segment of the key is percent-encoded, so `#`,
    /// `?` and spaces stay part of the object name.
    pub fn object_url(&self, key: &str) -> Result<Url, StorageError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StorageError::InvalidKey(key.to_string()))?
            .pop_if_empty()
            .extend(key.split('/').filter(|segment| !segment.is_empty()));
        Ok(url)
    }

    async fn send(&self, key: &str, head: bool) -> Result<Option<Response>, StorageError> {
        let url = self.object_url(key)?;
        let request = if head {
            self.client.head(url.clone())
        } else {
            self.client.get(url.clone())
        };

        let response = request.send().await.map_err(|e| transport_error(key, e))?;
        let status = response.status();
        debug!(url = %url, status = %status, "Object request");

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(StorageError::Http {
                key: key.to_string(),
                reason: format!("HTTP {}", status),
            });
        }
        Ok(Some(response))
    }
}

impl ObjectStore for HttpStore {
    fn get(&self, key: &str) -> BoxFuture<'_, Result<Option<Vec<u8>>, StorageError>> {
        let key = key.to_string();
        Box::pin(async move {
            let Some(response) = self.send(&key, false).await? else {
                return Ok(None);
            };
            let bytes = response
                .bytes()
                .await
                .map_err(|e| transport_error(&key, e))?;
            Ok(Some(bytes.to_vec()))
        })
    }

    fn head(&self, key: &str) -> BoxFuture<'_, Result<Option<ObjectMeta>, StorageError>> {
        let key = key.to_string();
        Box::pin(async move {
            let Some(response) = self.send(&key, true).await? else {
                return Ok(None);
            };
            let size = response
                .headers()
                .get("content-length")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(0);
            Ok(Some(ObjectMeta { key, size }))
        })
    }

    fn name(&self) -> &str {
        "http"
    }
}

fn transport_error(key: &str, e: reqwest::Error) -> StorageError {
    if e.is_timeout() {
        StorageError::Timeout {
            key: key.to_string(),
        }
    } else {
        StorageError::Http {
            key: key.to_string(),
            reason: e.to_string(),
        }
    }
}
