//! Path redirection against the app's registries.

use tracing::{debug, instrument};

use crate::error::{ResolveError, ResolveResult};
use crate::path::{
    build_path, extract_version_from_path, is_manifest_file, path_includes_build_id,
};
use crate::registry::{load_build_registry, load_release_registry};
use crate::storage::ObjectStore;

use super::rules::{used_redirection, RuleContext};

/// Deepest recursion level `apply_redirections` accepts.
pub const MAX_RECURSION_LEVEL: u8 = 2;

/// Outcome of redirecting an object key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redirection {
    /// Serve this object key.
    Path(String),
    /// Send the client to another update feed.
    FeedUrl(String),
}

impl Redirection {
    /// The object key to serve, or `fallback` for feed redirections.
    pub fn into_path_or(self, fallback: &str) -> String {
        match self {
            Self::Path(path) => path,
            Self::FeedUrl(_) => fallback.to_string(),
        }
    }
}

/// Rewrite an object key according to the registries.
///
/// 1. Manifests that already name a build are served as is.
/// 2. Manifests that name a version are pinned to the released build with
///    that version, or served as is when no such build is tracked.
/// 3. Everything else goes through the release redirection rules. Only
///    manifests are rewritten.
///
/// # Errors
///
/// Fails with [`ResolveError::RecursionExceeded`] when `recursion_level`
/// is above [`MAX_RECURSION_LEVEL`], before any other work. Registry read
/// and decode failures are propagated.
#[instrument(level = "debug", skip(store), fields(store = store.name()))]
pub async fn apply_redirections(
    store: &dyn ObjectStore,
    original_path: &str,
    client_ip: &str,
    recursion_level: u8,
) -> ResolveResult<Redirection> {
    if recursion_level > MAX_RECURSION_LEVEL {
        return Err(ResolveError::RecursionExceeded {
            level: recursion_level,
            limit: MAX_RECURSION_LEVEL,
        });
    }

    let is_manifest = is_manifest_file(original_path);

    if is_manifest && path_includes_build_id(original_path) {
        debug!("Path names a build, skipping redirections");
        return Ok(Redirection::Path(original_path.to_string()));
    }

    if is_manifest {
        if let Some(version) = extract_version_from_path(original_path) {
            let builds = load_build_registry(store).await?;
            return Ok(match builds.build_id_for_version(version) {
                Some(build_id) => {
                    debug!(version = version, build_id = build_id, "Version pinned to build");
                    Redirection::Path(build_path(original_path, build_id))
                }
                None => {
                    debug!(version = version, "No released build for version");
                    Redirection::Path(original_path.to_string())
                }
            });
        }
    }

    let releases = load_release_registry(store).await?;
    let rules = releases.effective_rules();
    let ctx = RuleContext {
        client_ip,
        original_path,
    };

    match used_redirection(&rules, &ctx) {
        Some(build_id) if is_manifest => {
            debug!(build_id = build_id, "Redirection rule applied");
            Ok(Redirection::Path(build_path(original_path, build_id)))
        }
        _ => Ok(Redirection::Path(original_path.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{BUILDS_KEY, RELEASES_KEY};
    use crate::storage::MemoryStore;

    fn releases_store(releases: &str) -> MemoryStore {
        MemoryStore::new().with_object(RELEASES_KEY, releases.to_string())
    }

    fn path(value: &str) -> Redirection {
        Redirection::Path(value.to_string())
    }

    #[tokio::test]
    async fn test_recursion_limit_checked_first() {
        // Even a build-pinned path fails past the limit.
        let store = MemoryStore::new();
        let err = apply_redirections(&store, "app/latest-build-abc.yml", "", 3)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ResolveError::RecursionExceeded { level: 3, limit: 2 }
        ));
    }

    #[tokio::test]
    async fn test_recursion_limit_is_inclusive() {
        let store = MemoryStore::new();
        let result = apply_redirections(&store, "app/latest.yml", "", MAX_RECURSION_LEVEL).await;
        assert_eq!(result.unwrap(), path("app/latest.yml"));
    }

    #[tokio::test]
    async fn test_build_paths_bypass_rules() {
        let store = releases_store(r#"{"latestReleaseBuildId": "other"}"#);
        let result = apply_redirections(&store, "td-latest-mac-build-b1.json", "", 0)
            .await
            .unwrap();
        assert_eq!(result, path("td-latest-mac-build-b1.json"));
    }

    #[tokio::test]
    async fn test_version_maps_to_released_build() {
        let store = MemoryStore::new()
            .with_object(
                BUILDS_KEY,
                r#"[
                    {"id": "draft", "version": "3.1.3", "isReleased": false},
                    {"id": "b313", "version": "3.1.3", "isReleased": true}
                ]"#,
            )
            .with_object(RELEASES_KEY, r#"{"latestReleaseBuildId": "latest"}"#);

        let result = apply_redirections(&store, "td-latest-mac-3.1.3.json", "", 0)
            .await
            .unwrap();
        assert_eq!(result, path("td-latest-mac-build-b313.json"));
    }

    #[tokio::test]
    async fn test_unmapped_version_is_left_alone() {
        // The release rules are not consulted for versioned paths.
        let store = releases_store(r#"{"latestReleaseBuildId": "latest"}"#);
        let result = apply_redirections(&store, "td-latest-mac-9.9.9.json", "", 0)
            .await
            .unwrap();
        assert_eq!(result, path("td-latest-mac-9.9.9.json"));
    }

    #[tokio::test]
    async fn test_latest_release_pointer() {
        let store = releases_store(r#"{"latestReleaseBuildId": "b2"}"#);
        let result = apply_redirections(&store, "td-latest.json", "", 0).await.unwrap();
        assert_eq!(result, path("td-latest-build-b2.json"));
    }

    #[tokio::test]
    async fn test_platform_rule_beats_latest_pointer() {
        let store = releases_store(
            r#"{
                "latestReleaseBuildId": "b2",
                "releaseRedirections": [{"rule": "buildByPlatform", "buildId": "b1", "platforms": ["mac"]}]
            }"#,
        );

        let mac = apply_redirections(&store, "td-latest-mac.json", "", 0).await.unwrap();
        assert_eq!(mac, path("td-latest-mac-build-b1.json"));

        let linux = apply_redirections(&store, "td-latest-linux.json", "", 0)
            .await
            .unwrap();
        assert_eq!(linux, path("td-latest-linux-build-b2.json"));
    }

    #[tokio::test]
    async fn test_ip_rule_uses_client_ip() {
        let store = releases_store(
            r#"{
                "latestReleaseBuildId": "b2",
                "releaseRedirections": [{"rule": "buildByIp", "buildId": "beta", "ipList": ["192.0.2.7"]}]
            }"#,
        );

        let pinned = apply_redirections(&store, "app/latest.yml", "192.0.2.7", 0)
            .await
            .unwrap();
        assert_eq!(pinned, path("app/latest-build-beta.yml"));

        let other = apply_redirections(&store, "app/latest.yml", "192.0.2.8", 0)
            .await
            .unwrap();
        assert_eq!(other, path("app/latest-build-b2.yml"));
    }

    #[tokio::test]
    async fn test_non_manifest_never_rewritten() {
        let store = releases_store(r#"{"latestReleaseBuildId": "b2"}"#);
        let result = apply_redirections(&store, "app/App Setup 1.0.0.exe", "", 0)
            .await
            .unwrap();
        assert_eq!(result, path("app/App Setup 1.0.0.exe"));
    }

    #[tokio::test]
    async fn test_no_registries_means_no_rewrite() {
        let store = MemoryStore::new();
        let result = apply_redirections(&store, "td-latest.json", "", 0).await.unwrap();
        assert_eq!(result, path("td-latest.json"));
    }

    #[tokio::test]
    async fn test_malformed_release_registry_fails() {
        let store = releases_store(r#"{"releaseRedirections": 5}"#);
        let err = apply_redirections(&store, "td-latest.json", "", 0)
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::Parse { .. }));
    }

    #[test]
    fn test_feed_redirection_keeps_fallback_key() {
        assert_eq!(path("a").into_path_or("fallback"), "a");
        let feed = Redirection::FeedUrl("https://feed.example".into());
        assert_eq!(feed.into_path_or("fallback"), "fallback");
    }
}
