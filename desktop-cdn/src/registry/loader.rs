//! Loading registry documents from the object store.
//!
//! Registries are read fresh for every resolution. An app that never
//! published a registry document simply has no redirections and no
//! tracked builds.

use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::error::{ResolveError, ResolveResult};
use crate::storage::ObjectStore;

use super::types::{BuildRegistry, ReleaseRegistry};

/// Object key of the release registry.
pub const RELEASES_KEY: &str = "desktop-releases.json";

/// Object key of the build registry.
pub const BUILDS_KEY: &str = "desktop-builds.json";

/// Load `desktop-releases.json`, treating a missing object as empty.
pub async fn load_release_registry(store: &dyn ObjectStore) -> ResolveResult<ReleaseRegistry> {
    load_or_default(store, RELEASES_KEY).await
}

/// Load `desktop-builds.json`, treating a missing object as empty.
pub async fn load_build_registry(store: &dyn ObjectStore) -> ResolveResult<BuildRegistry> {
    load_or_default(store, BUILDS_KEY).await
}

async fn load_or_default<T>(store: &dyn ObjectStore, key: &str) -> ResolveResult<T>
where
    T: DeserializeOwned + Default,
{
    match store.get(key).await? {
        Some(bytes) => {
            trace!(key = key, store = store.name(), bytes = bytes.len(), "Registry loaded");
            serde_json::from_slice(&bytes).map_err(|source| ResolveError::Parse {
                key: key.to_string(),
                source,
            })
        }
        None => {
            debug!(key = key, store = store.name(), "Registry absent, using empty registry");
            Ok(T::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RedirectionRule;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn test_missing_registries_are_empty() {
        let store = MemoryStore::new();

        let releases = load_release_registry(&store).await.unwrap();
        let builds = load_build_registry(&store).await.unwrap();

        assert_eq!(releases, ReleaseRegistry::default());
        assert!(builds.builds.is_empty());
    }

    #[tokio::test]
    async fn test_present_registries_decode() {
        let store = MemoryStore::new()
            .with_object(
                RELEASES_KEY,
                r#"{"latestReleaseBuildId": "b1", "releaseRedirections": [{"rule": "build", "buildId": "b0"}]}"#,
            )
            .with_object(
                BUILDS_KEY,
                r#"[{"id": "b1", "version": "1.0.0", "isReleased": true, "createdAt": "2024-01-01"}]"#,
            );

        let releases = load_release_registry(&store).await.unwrap();
        assert_eq!(releases.latest_release_build_id.as_deref(), Some("b1"));
        assert_eq!(
            releases.release_redirections,
            vec![RedirectionRule::Build {
                build_id: "b0".into()
            }]
        );

        let builds = load_build_registry(&store).await.unwrap();
        assert_eq!(builds.build_id_for_version("1.0.0"), Some("b1"));
    }

    #[tokio::test]
    async fn test_malformed_registry_is_parse_error() {
        let store = MemoryStore::new().with_object(BUILDS_KEY, "{not json");

        let err = load_build_registry(&store).await.unwrap_err();
        assert!(matches!(err, ResolveError::Parse { ref key, .. } if key == BUILDS_KEY));
        assert_eq!(err.status_code(), 500);
    }
}
