//! Request and response types of the download flow.

use serde::{Deserialize, Serialize};

use crate::error::{ResolveError, ResolveResult};
use crate::manifest::{ArtifactDetails, Manifest};
use crate::platform::{Arch, PlatformName};

/// What a client asked to download.
///
/// Every identifying field is optional. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadRequest {
    pub app_version: Option<String>,
    pub build_id: Option<String>,
    pub platform: Option<String>,
    pub arch: Option<String>,
    pub artifact_name: Option<String>,
    #[serde(default)]
    pub user_agent: String,
    pub channel: Option<String>,
    pub client_ip: Option<String>,
}

impl DownloadRequest {
    /// Create a request identified only by a user-agent.
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            ..Default::default()
        }
    }

    pub fn with_app_version(mut self, app_version: impl Into<String>) -> Self {
        self.app_version = Some(app_version.into());
        self
    }

    pub fn with_build_id(mut self, build_id: impl Into<String>) -> Self {
        self.build_id = Some(build_id.into());
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    pub fn with_arch(mut self, arch: impl Into<String>) -> Self {
        self.arch = Some(arch.into());
        self
    }

    pub fn with_artifact_name(mut self, artifact_name: impl Into<String>) -> Self {
        self.artifact_name = Some(artifact_name.into());
        self
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn with_client_ip(mut self, client_ip: impl Into<String>) -> Self {
        self.client_ip = Some(client_ip.into());
        self
    }

    pub fn app_version(&self) -> Option<&str> {
        present(&self.app_version)
    }

    pub fn build_id(&self) -> Option<&str> {
        present(&self.build_id)
    }

    pub fn platform(&self) -> Option<&str> {
        present(&self.platform)
    }

    pub fn arch(&self) -> Option<&str> {
        present(&self.arch)
    }

    pub fn artifact_name(&self) -> Option<&str> {
        present(&self.artifact_name)
    }

    pub fn channel(&self) -> Option<&str> {
        present(&self.channel)
    }

    pub fn client_ip(&self) -> Option<&str> {
        present(&self.client_ip)
    }

    /// Reject requests that cannot be resolved.
    ///
    /// Identifying fields may only contain ASCII letters, digits, `.` and
    /// `-`, since they end up in object keys. An explicit platform must be
    /// supported, and without one a user-agent is required.
    pub fn validate(&self) -> ResolveResult<()> {
        let fields = [
            ("appVersion", self.app_version()),
            ("arch", self.arch()),
            ("artifactName", self.artifact_name()),
            ("buildId", self.build_id()),
            ("channel", self.channel()),
            ("platform", self.platform()),
        ];
        for (field, value) in fields {
            if value.is_some_and(|v| !is_key_safe(v)) {
                return Err(ResolveError::BadRequest(format!("URL is invalid ({})", field)));
            }
        }

        match self.platform() {
            Some(platform) if PlatformName::parse(platform).is_none() => Err(
                ResolveError::BadRequest(format!("Unsupported platform ({})", platform)),
            ),
            None if self.user_agent.is_empty() => Err(ResolveError::BadRequest(
                "No userAgent argument given".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Returns true if every character is an ASCII letter, digit, `.` or `-`.
pub fn is_key_safe(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
}

/// The artifact a download request resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedArtifact {
    /// Object key of the installer.
    pub path: String,
    pub url: String,
    pub platform: PlatformName,
    /// Requested or detected architecture, before fallbacks.
    pub arch: Arch,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,
}

impl ResolvedArtifact {
    pub(crate) fn new(
        details: &ArtifactDetails,
        manifest: &Manifest,
        platform: PlatformName,
        arch: Arch,
    ) -> Self {
        Self {
            path: details.path.clone(),
            url: details.url.clone(),
            platform,
            arch,
            version: manifest.version.clone(),
            created_at: manifest.created_at.clone(),
            sha256: details.sha256.clone(),
            size: details.size,
            md5: details.md5.clone(),
        }
    }
}

/// An object the raw path flow resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedObject {
    /// Object key after redirections.
    pub key: String,
    /// Object size in bytes.
    pub size: u64,
}
