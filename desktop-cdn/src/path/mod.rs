//! Object key conventions.
//!
//! Everything the resolver knows about how keys in the object store are
//! shaped lives here: manifest naming, per-build and per-version rewrites,
//! legacy fixups, and the filename shown to downloading clients. All
//! functions are pure string transformations.

mod download_name;
mod legacy;
mod naming;
mod utils;

pub use download_name::make_download_filename;
pub use legacy::transform_legacy_build_path;
pub use naming::{manifest_filename, ManifestName, DEFAULT_CHANNEL};
pub use utils::{
    app_id_from_path, build_path, extract_version_from_path, filename_from_path,
    is_latest_manifest_file, is_manifest_file, path_includes_build_id, path_includes_version,
    platform_from_manifest_path, BUILD_ID_TOKEN,
};
