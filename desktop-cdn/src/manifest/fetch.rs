//! Manifest lookup through the redirection engine.

use tracing::debug;

use crate::error::{ResolveError, ResolveResult};
use crate::path::{manifest_filename, transform_legacy_build_path, ManifestName};
use crate::platform::PlatformName;
use crate::redirect::apply_redirections;
use crate::storage::ObjectStore;

use super::types::Manifest;

/// Which manifest to fetch.
#[derive(Debug, Clone, Copy)]
pub struct ManifestQuery<'a> {
    pub app_version: Option<&'a str>,
    pub build_id: Option<&'a str>,
    pub channel: Option<&'a str>,
    pub platform: PlatformName,
    /// Forwarded to IP-gated redirection rules.
    pub client_ip: Option<&'a str>,
}

impl<'a> ManifestQuery<'a> {
    /// Query for the channel's current manifest on `platform`.
    pub fn new(platform: PlatformName) -> Self {
        Self {
            app_version: None,
            build_id: None,
            channel: None,
            platform,
            client_ip: None,
        }
    }

    pub fn with_app_version(mut self, app_version: Option<&'a str>) -> Self {
        self.app_version = app_version;
        self
    }

    pub fn with_build_id(mut self, build_id: Option<&'a str>) -> Self {
        self.build_id = build_id;
        self
    }

    pub fn with_channel(mut self, channel: Option<&'a str>) -> Self {
        self.channel = channel;
        self
    }

    pub fn with_client_ip(mut self, client_ip: Option<&'a str>) -> Self {
        self.client_ip = client_ip;
        self
    }

    /// Object key of the manifest before redirections.
    pub fn filename(&self) -> String {
        manifest_filename(
            &ManifestName::custom(self.platform)
                .with_app_version(self.app_version)
                .with_build_id(self.build_id)
                .with_channel(self.channel),
        )
    }
}

/// Fetch and decode the custom manifest a query resolves to.
///
/// The query's filename is redirected, legacy names are fixed up, and the
/// resulting key is read from the store.
///
/// # Errors
///
/// - `NotFound` if no object exists under the resolved key
/// - `Parse` if the object is not a valid manifest
/// - Any redirection or storage failure
pub async fn fetch_manifest(
    store: &dyn ObjectStore,
    query: &ManifestQuery<'_>,
) -> ResolveResult<Manifest> {
    let original = query.filename();

    let redirected = apply_redirections(store, &original, query.client_ip.unwrap_or(""), 0)
        .await?
        .into_path_or(&original);
    let key = transform_legacy_build_path(&redirected);

    debug!(
        original = %original,
        key = %key,
        platform = %query.platform,
        "Fetching manifest"
    );

    let bytes = store
        .get(&key)
        .await?
        .ok_or_else(|| ResolveError::not_found(format!("Could not find: {}", key), query.build_id))?;

    serde_json::from_slice(&bytes).map_err(|source| ResolveError::Parse { key, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RELEASES_KEY;
    use crate::storage::MemoryStore;

    const MANIFEST: &str = r#"{"version": "2.0.0", "artifacts": {}}"#;

    #[test]
    fn test_query_filename() {
        let query = ManifestQuery::new(PlatformName::Mac)
            .with_build_id(Some("b1"))
            .with_channel(Some("beta"));
        assert_eq!(query.filename(), "td-beta-mac-build-b1.json");
    }

    #[tokio::test]
    async fn test_fetch_follows_latest_pointer() {
        let store = MemoryStore::new()
            .with_object(RELEASES_KEY, r#"{"latestReleaseBuildId": "b2"}"#)
            .with_object("td-latest-linux-build-b2.json", MANIFEST);

        let manifest = fetch_manifest(&store, &ManifestQuery::new(PlatformName::Linux))
            .await
            .unwrap();
        assert_eq!(manifest.version.as_deref(), Some("2.0.0"));
    }

    #[tokio::test]
    async fn test_fetch_without_registry_reads_plain_name() {
        let store = MemoryStore::new().with_object("td-latest.json", MANIFEST);

        let manifest = fetch_manifest(&store, &ManifestQuery::new(PlatformName::Windows))
            .await
            .unwrap();
        assert_eq!(manifest.version.as_deref(), Some("2.0.0"));
    }

    #[tokio::test]
    async fn test_missing_manifest_names_key_and_build() {
        let store = MemoryStore::new();
        let query = ManifestQuery::new(PlatformName::Mac).with_build_id(Some("abc"));

        let err = fetch_manifest(&store, &query).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert_eq!(
            err.to_string(),
            "Could not find: td-latest-mac-build-abc.json and build ID abc"
        );
    }

    #[tokio::test]
    async fn test_invalid_manifest_is_parse_error() {
        let store = MemoryStore::new().with_object("td-latest.json", "<html>");

        let err = fetch_manifest(&store, &ManifestQuery::new(PlatformName::Windows))
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::Parse { ref key, .. } if key == "td-latest.json"));
    }

    #[tokio::test]
    async fn test_client_ip_reaches_rules() {
        let store = MemoryStore::new()
            .with_object(
                RELEASES_KEY,
                r#"{
                    "latestReleaseBuildId": "stable",
                    "releaseRedirections": [{"rule": "buildByIp", "buildId": "canary", "ipList": ["203.0.113.5"]}]
                }"#,
            )
            .with_object("td-latest-build-canary.json", r#"{"version": "2.1.0-canary"}"#)
            .with_object("td-latest-build-stable.json", MANIFEST);

        let canary = ManifestQuery::new(PlatformName::Windows).with_client_ip(Some("203.0.113.5"));
        let manifest = fetch_manifest(&store, &canary).await.unwrap();
        assert_eq!(manifest.version.as_deref(), Some("2.1.0-canary"));

        let manifest = fetch_manifest(&store, &ManifestQuery::new(PlatformName::Windows))
            .await
            .unwrap();
        assert_eq!(manifest.version.as_deref(), Some("2.0.0"));
    }
}
