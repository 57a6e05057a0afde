//! Custom manifests.
//!
//! A custom manifest lists every artifact variant of one build for one
//! platform. Manifests are produced upstream and only read here.

mod fetch;
mod types;

pub use fetch::{fetch_manifest, ManifestQuery};
pub use types::{ArchTable, ArtifactDetails, Manifest};
