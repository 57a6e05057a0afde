//! Custom manifest document model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::platform::Arch;

/// Architecture name to artifact details, as written in a manifest.
///
/// Either level may be `null` in the document; a null entry is the same as
/// a missing one.
pub type ArchTable = BTreeMap<String, Option<ArtifactDetails>>;

/// A custom (`td-*.json`) manifest produced at build time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Artifact kind (e.g. "dmg", "nsis-web") to per-architecture entries.
    #[serde(default)]
    pub artifacts: BTreeMap<String, Option<ArchTable>>,
}

/// One installable file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactDetails {
    pub url: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,
}

impl Manifest {
    /// Entries for an artifact kind, if the kind is enabled.
    pub fn kind(&self, kind: &str) -> Option<&ArchTable> {
        self.artifacts.get(kind).and_then(Option::as_ref)
    }

    /// Details for one kind and architecture.
    pub fn details(&self, kind: &str, arch: Arch) -> Option<&ArtifactDetails> {
        self.kind(kind)?.get(arch.as_str()).and_then(Option::as_ref)
    }

    /// Returns true if the kind carries a universal or x64 build.
    pub fn has_default_arch(&self, kind: &str) -> bool {
        self.details(kind, Arch::Universal).is_some() || self.details(kind, Arch::X64).is_some()
    }

    /// Enabled kind whose name matches `name` ignoring ASCII case.
    pub fn find_kind_ignore_case(&self, name: &str) -> Option<&str> {
        self.artifacts
            .iter()
            .find(|(kind, table)| table.is_some() && kind.eq_ignore_ascii_case(name))
            .map(|(kind, _)| kind.as_str())
    }
}
