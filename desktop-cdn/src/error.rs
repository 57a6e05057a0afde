//! Error types for download resolution.
//!
//! Every failure carries the HTTP status code the front door should answer
//! with. Client-facing kinds (`BadRequest`, `NotFound`) are safe to echo back
//! to the caller; the rest are server faults.

use thiserror::Error;

use crate::storage::StorageError;

/// Result type for resolution operations.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Errors that can occur while resolving a download or object path.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// An identifying field was malformed or unsupported.
    #[error("{0}")]
    BadRequest(String),

    /// The manifest, artifact kind, or architecture entry does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Redirection was invoked deeper than the allowed recursion limit.
    #[error("Recursion level {level} exceeded {limit}")]
    RecursionExceeded { level: u8, limit: u8 },

    /// The object store failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// A registry or manifest object exists but could not be decoded.
    #[error("failed to parse {key}: {source}")]
    Parse {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ResolveError {
    /// Create a `NotFound` error, appending the build ID when known.
    ///
    /// ```
    /// use desktop_cdn::ResolveError;
    ///
    /// let err = ResolveError::not_found("Could not find: td-latest.json", Some("abc"));
    /// assert_eq!(err.to_string(), "Could not find: td-latest.json and build ID abc");
    /// ```
    pub fn not_found(message: impl Into<String>, build_id: Option<&str>) -> Self {
        Self::NotFound(with_build_id(message.into(), build_id))
    }

    /// HTTP status code associated with this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::NotFound(_) => 404,
            Self::RecursionExceeded { .. } | Self::Storage(_) | Self::Parse { .. } => 500,
        }
    }

    /// Returns true for errors caused by the request rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::BadRequest(_) | Self::NotFound(_))
    }
}

fn with_build_id(message: String, build_id: Option<&str>) -> String {
    match build_id {
        Some(id) if !id.is_empty() => format!("{} and build ID {}", message, id),
        _ => message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ResolveError::BadRequest("x".into()).status_code(), 400);
        assert_eq!(ResolveError::NotFound("x".into()).status_code(), 404);
        assert_eq!(
            ResolveError::RecursionExceeded { level: 3, limit: 2 }.status_code(),
            500
        );
        let storage = ResolveError::from(StorageError::InvalidKey("..".into()));
        assert_eq!(storage.status_code(), 500);
    }

    #[test]
    fn test_not_found_without_build_id() {
        let err = ResolveError::not_found("Couldn't find mac app", None);
        assert_eq!(err.to_string(), "Couldn't find mac app");

        let err = ResolveError::not_found("Couldn't find mac app", Some(""));
        assert_eq!(err.to_string(), "Couldn't find mac app");
    }

    #[test]
    fn test_client_error_classification() {
        assert!(ResolveError::BadRequest("bad".into()).is_client_error());
        assert!(ResolveError::NotFound("missing".into()).is_client_error());
        assert!(!ResolveError::RecursionExceeded { level: 3, limit: 2 }.is_client_error());
    }

    #[test]
    fn test_recursion_display() {
        let err = ResolveError::RecursionExceeded { level: 3, limit: 2 };
        assert_eq!(err.to_string(), "Recursion level 3 exceeded 2");
    }
}
