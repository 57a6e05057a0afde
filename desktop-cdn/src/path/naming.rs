//! Update manifest naming conventions.
//!
//! Two manifest flavours are published per build:
//!
//! - Custom manifests (`td-` prefix, `.json`): artifact tables read by the
//!   download flow
//! - electron-builder manifests (`.yml`): feeds read by auto-updaters
//!
//! # Format
//!
//! `[td-]{channel}[-{platform}][-{version} | -build-{buildId}].{json|yml}`
//!
//! Windows is the implicit platform and is never encoded in the name.

use crate::platform::PlatformName;

use super::utils::BUILD_ID_TOKEN;

/// Default release channel.
pub const DEFAULT_CHANNEL: &str = "latest";

/// Inputs for [`manifest_filename`].
#[derive(Debug, Clone, Copy)]
pub struct ManifestName<'a> {
    /// Requested app version; wins over `build_id` when both are set.
    pub app_version: Option<&'a str>,
    /// Requested build ID.
    pub build_id: Option<&'a str>,
    /// Release channel, `None` meaning [`DEFAULT_CHANNEL`].
    pub channel: Option<&'a str>,
    /// Custom (`td-*.json`) rather than electron-builder (`*.yml`) manifest.
    pub is_custom_manifest: bool,
    /// Target platform.
    pub platform: PlatformName,
}

impl<'a> ManifestName<'a> {
    /// Name for the channel's current custom manifest on `platform`.
    pub fn custom(platform: PlatformName) -> Self {
        Self {
            app_version: None,
            build_id: None,
            channel: None,
            is_custom_manifest: true,
            platform,
        }
    }

    /// Name for the channel's current electron-builder manifest on `platform`.
    pub fn electron_builder(platform: PlatformName) -> Self {
        Self {
            is_custom_manifest: false,
            ..Self::custom(platform)
        }
    }

    /// Pin to an app version.
    pub fn with_app_version(mut self, app_version: Option<&'a str>) -> Self {
        self.app_version = app_version;
        self
    }

    /// Pin to a build ID.
    pub fn with_build_id(mut self, build_id: Option<&'a str>) -> Self {
        self.build_id = build_id;
        self
    }

    /// Use a channel other than the default.
    pub fn with_channel(mut self, channel: Option<&'a str>) -> Self {
        self.channel = channel;
        self
    }
}

/// Construct a manifest filename.
///
/// # Examples
///
/// ```
/// use desktop_cdn::path::{manifest_filename, ManifestName};
/// use desktop_cdn::platform::PlatformName;
///
/// assert_eq!(
///     manifest_filename(&ManifestName::custom(PlatformName::Windows)),
///     "td-latest.json"
/// );
/// assert_eq!(
///     manifest_filename(
///         &ManifestName::electron_builder(PlatformName::Mac).with_build_id(Some("b1"))
///     ),
///     "latest-mac-build-b1.yml"
/// );
/// ```
pub fn manifest_filename(name: &ManifestName<'_>) -> String {
    let channel = name
        .channel
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CHANNEL);

    let mut filename = String::new();
    if name.is_custom_manifest {
        filename.push_str("td-");
    }
    filename.push_str(channel);

    if name.platform != PlatformName::Windows {
        filename.push('-');
        filename.push_str(name.platform.as_str());
    }

    // A versioned manifest exists alongside every per-build manifest.
    match (non_empty(name.app_version), non_empty(name.build_id)) {
        (Some(version), _) => {
            filename.push('-');
            filename.push_str(version);
        }
        (None, Some(build_id)) => {
            filename.push_str(BUILD_ID_TOKEN);
            filename.push_str(build_id);
        }
        (None, None) => {}
    }

    filename.push_str(if name.is_custom_manifest { ".json" } else { ".yml" });
    filename
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
