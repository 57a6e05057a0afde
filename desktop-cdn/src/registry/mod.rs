//! Release and build registries.
//!
//! Two JSON documents at the bucket root steer resolution:
//!
//! - `desktop-releases.json`: the latest release pointer and the ordered
//!   redirection rules
//! - `desktop-builds.json`: every build with its version and release flag,
//!   used to map a requested version onto a build ID

mod loader;
mod types;

pub use loader::{load_build_registry, load_release_registry, BUILDS_KEY, RELEASES_KEY};
pub use types::{BuildEntry, BuildRegistry, RedirectionRule, ReleaseRegistry};
