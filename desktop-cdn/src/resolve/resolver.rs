//! Download resolution entry points.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::artifact::{
    select_artifact_details, select_artifact_name, ArtifactPriorities, ArtifactRequest,
};
use crate::error::{ResolveError, ResolveResult};
use crate::manifest::{fetch_manifest, ManifestQuery};
use crate::path::{app_id_from_path, transform_legacy_build_path, DEFAULT_CHANNEL};
use crate::platform::{parse_arch, resolve_mac_arch, resolve_platform, Arch, PlatformName};
use crate::redirect::apply_redirections;
use crate::storage::ObjectStore;

use super::request::{DownloadRequest, ResolvedArtifact, ResolvedObject};

/// Architectures tried, in order, when the client did not name one.
pub const DEFAULT_ARCH_FALLBACKS: [Arch; 2] = [Arch::X64, Arch::Arm64];

/// Options for [`DownloadResolver`].
#[derive(Debug, Clone)]
pub struct ResolverOptions {
    /// Channel used when a request does not name one.
    pub channel: String,
    /// Artifact kind priority tables.
    pub priorities: ArtifactPriorities,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            channel: DEFAULT_CHANNEL.to_string(),
            priorities: ArtifactPriorities::default(),
        }
    }
}

impl ResolverOptions {
    /// Set the default channel.
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = channel.into();
        self
    }

    /// Set the artifact priority tables.
    pub fn with_priorities(mut self, priorities: ArtifactPriorities) -> Self {
        self.priorities = priorities;
        self
    }
}

/// Architecture decision for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ArchPlan {
    arch: Arch,
    fallbacks: Vec<Arch>,
    universal_installer_supported: bool,
}

/// Resolves download requests and raw object paths against a store.
///
/// Holds no per-request state; one resolver serves concurrent requests.
pub struct DownloadResolver {
    store: Arc<dyn ObjectStore>,
    options: ResolverOptions,
}

impl DownloadResolver {
    /// Create a resolver over a store.
    pub fn new(store: Arc<dyn ObjectStore>, options: ResolverOptions) -> Self {
        Self { store, options }
    }

    /// The resolver's options.
    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Resolve a download request to one artifact.
    ///
    /// # Errors
    ///
    /// - `BadRequest` for malformed or unsupported identifying fields
    /// - `NotFound` when the manifest, kind or architecture is missing
    /// - Upstream failures from registries, manifests or the store
    #[instrument(level = "debug", skip_all, fields(store = self.store.name()))]
    pub async fn resolve(&self, request: &DownloadRequest) -> ResolveResult<ResolvedArtifact> {
        request.validate()?;

        let platform = resolve_platform(request.platform(), &request.user_agent);
        debug!(platform = %platform, explicit = request.platform().is_some(), "Platform resolved");

        let plan = plan_arch(platform, request)?;
        debug!(
            arch = %plan.arch,
            fallbacks = ?plan.fallbacks,
            universal_installer = plan.universal_installer_supported,
            "Architecture resolved"
        );

        let channel = request.channel().unwrap_or(&self.options.channel);
        let query = ManifestQuery::new(platform)
            .with_app_version(request.app_version())
            .with_build_id(request.build_id())
            .with_channel(Some(channel))
            .with_client_ip(request.client_ip());
        let manifest = fetch_manifest(self.store.as_ref(), &query).await?;

        let kind = select_artifact_name(
            &manifest,
            &self.options.priorities,
            &ArtifactRequest {
                platform,
                arch: plan.arch,
                desired: request.artifact_name(),
                universal_installer_supported: plan.universal_installer_supported,
            },
        )?;
        debug!(kind = %kind, "Artifact kind selected");

        let details = select_artifact_details(
            &manifest,
            platform,
            &kind,
            plan.arch,
            &plan.fallbacks,
            request.build_id(),
        )?;

        let resolved = ResolvedArtifact::new(details, &manifest, platform, plan.arch);
        info!(
            path = %resolved.path,
            platform = %platform,
            arch = %plan.arch,
            kind = %kind,
            "Download resolved"
        );
        Ok(resolved)
    }

    /// Resolve a raw object path, as requested by auto-updaters.
    ///
    /// # Errors
    ///
    /// - `BadRequest` for an empty path
    /// - `NotFound` when nothing is stored under the redirected key
    #[instrument(level = "debug", skip(self), fields(store = self.store.name()))]
    pub async fn resolve_object_path(
        &self,
        path: &str,
        client_ip: Option<&str>,
    ) -> ResolveResult<ResolvedObject> {
        if path.is_empty() {
            return Err(ResolveError::BadRequest("Bad Request".to_string()));
        }

        let redirected = apply_redirections(self.store.as_ref(), path, client_ip.unwrap_or(""), 0)
            .await?
            .into_path_or(path);
        let key = transform_legacy_build_path(&redirected);
        debug!(app_id = app_id_from_path(&key), key = %key, "Object path redirected");

        match self.store.head(&key).await? {
            Some(meta) => {
                info!(key = %meta.key, size = meta.size, "Object resolved");
                Ok(ResolvedObject {
                    key,
                    size: meta.size,
                })
            }
            None => Err(ResolveError::NotFound(format!("Not Found: {}", key))),
        }
    }
}

fn plan_arch(platform: PlatformName, request: &DownloadRequest) -> ResolveResult<ArchPlan> {
    let mut plan = match request.arch() {
        Some(explicit) => ArchPlan {
            arch: parse_arch(explicit)?,
            fallbacks: Vec::new(),
            universal_installer_supported: true,
        },
        None if platform == PlatformName::Mac => {
            let mac = resolve_mac_arch(&request.user_agent);
            ArchPlan {
                arch: mac.arch,
                fallbacks: DEFAULT_ARCH_FALLBACKS.to_vec(),
                universal_installer_supported: mac.universal_installer_supported,
            }
        }
        None => ArchPlan {
            arch: Arch::Universal,
            fallbacks: DEFAULT_ARCH_FALLBACKS.to_vec(),
            universal_installer_supported: true,
        },
    };

    // The universal installer only ever serves the channel's current release.
    if platform == PlatformName::Mac
        && (request.build_id().is_some() || request.app_version().is_some())
    {
        plan.universal_installer_supported = false;
    }

    Ok(plan)
}
