//! Artifact selection.
//!
//! Picks which installer kind a manifest should serve for a client and
//! which architecture variant of it, falling back across architectures
//! when the exact one is not published.

mod priorities;
mod select;

pub use priorities::ArtifactPriorities;
pub use select::{select_artifact_details, select_artifact_name, ArtifactRequest};
