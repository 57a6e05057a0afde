//! Artifact kind priority tables.

use crate::platform::{Arch, PlatformName};

/// Artifact kinds tried per platform, most preferred first.
///
/// The first kind with an enabled universal or x64 entry is served when the
/// client did not ask for a specific kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPriorities {
    pub linux: Vec<String>,
    /// Mac kinds when the universal architecture is requested.
    pub mac_universal: Vec<String>,
    pub mac: Vec<String>,
    pub windows: Vec<String>,
    /// Kind name of the universal macOS installer.
    pub universal_installer: String,
}

impl Default for ArtifactPriorities {
    fn default() -> Self {
        Self {
            linux: names(&["appImage", "deb", "rpm", "snap"]),
            mac_universal: names(&["installer", "dmg", "zip", "mas"]),
            mac: names(&["dmg", "zip", "pkg"]),
            windows: names(&["nsis-web", "nsis", "msi", "appx"]),
            universal_installer: "installer".to_string(),
        }
    }
}

impl ArtifactPriorities {
    /// Kinds to try for a platform and architecture.
    pub fn candidates(&self, platform: PlatformName, arch: Arch) -> &[String] {
        match (platform, arch) {
            (PlatformName::Linux, _) => &self.linux,
            (PlatformName::Mac, Arch::Universal) => &self.mac_universal,
            (PlatformName::Mac, _) => &self.mac,
            (PlatformName::Windows, _) => &self.windows,
        }
    }

    /// Replace the Linux table.
    pub fn with_linux(mut self, kinds: Vec<String>) -> Self {
        self.linux = kinds;
        self
    }

    /// Replace the universal-arch Mac table.
    pub fn with_mac_universal(mut self, kinds: Vec<String>) -> Self {
        self.mac_universal = kinds;
        self
    }

    /// Replace the Mac table.
    pub fn with_mac(mut self, kinds: Vec<String>) -> Self {
        self.mac = kinds;
        self
    }

    /// Replace the Windows table.
    pub fn with_windows(mut self, kinds: Vec<String>) -> Self {
        self.windows = kinds;
        self
    }
}

fn names(kinds: &[&str]) -> Vec<String> {
    kinds.iter().map(|kind| kind.to_string()).collect()
}
