//! Artifact kind and variant selection.

use tracing::{debug, trace};

use crate::error::{ResolveError, ResolveResult};
use crate::manifest::{ArtifactDetails, Manifest};
use crate::platform::{Arch, PlatformName};

use super::priorities::ArtifactPriorities;

/// Inputs for [`select_artifact_name`].
#[derive(Debug, Clone, Copy)]
pub struct ArtifactRequest<'a> {
    pub platform: PlatformName,
    pub arch: Arch,
    /// Kind the client asked for.
    pub desired: Option<&'a str>,
    /// Whether a Mac client may be served the universal installer.
    pub universal_installer_supported: bool,
}

/// Choose the artifact kind to serve.
///
/// A desired kind is honored when the manifest enables it, ignoring ASCII
/// case, and the manifest's spelling is returned. Otherwise the first
/// candidate with a universal or x64 entry wins, skipping the universal
/// installer for Macs that cannot run it.
///
/// # Errors
///
/// `NotFound` when no candidate is enabled in the manifest.
pub fn select_artifact_name(
    manifest: &Manifest,
    priorities: &ArtifactPriorities,
    request: &ArtifactRequest<'_>,
) -> ResolveResult<String> {
    let candidates = priorities.candidates(request.platform, request.arch);

    if let Some(desired) = request.desired.filter(|d| !d.is_empty()) {
        if let Some(kind) = manifest.find_kind_ignore_case(desired) {
            debug!(desired = desired, kind = kind, "Desired artifact kind honored");
            return Ok(kind.to_string());
        }
        trace!(desired = desired, "Desired artifact kind not in manifest, using priorities");
    }

    let skip_installer =
        request.platform == PlatformName::Mac && !request.universal_installer_supported;

    candidates
        .iter()
        .filter(|kind| !(skip_installer && **kind == priorities.universal_installer))
        .find(|kind| manifest.has_default_arch(kind))
        .cloned()
        .ok_or_else(|| ResolveError::NotFound(format!("Couldn't find {} app", request.platform)))
}

/// Pick the variant of `kind` for `arch`, trying `fallbacks` in order.
///
/// # Errors
///
/// `NotFound` naming the kind and requested arch, with the build ID
/// appended when known.
pub fn select_artifact_details<'m>(
    manifest: &'m Manifest,
    platform: PlatformName,
    kind: &str,
    arch: Arch,
    fallbacks: &[Arch],
    build_id: Option<&str>,
) -> ResolveResult<&'m ArtifactDetails> {
    std::iter::once(&arch)
        .chain(fallbacks)
        .find_map(|candidate| {
            let details = manifest.details(kind, *candidate)?;
            if *candidate != arch {
                debug!(kind = kind, requested = %arch, served = %candidate, "Architecture fallback");
            }
            Some(details)
        })
        .ok_or_else(|| {
            ResolveError::not_found(
                format!("Couldn't find {} app ({}-{})", platform, kind, arch),
                build_id,
            )
        })
}
