//! Object key predicates and rewrites shared across the resolver.
//!
//! Keys look like `{appId}/{filename}` for raw object requests, or a bare
//! `{filename}` for manifests looked up by the download flow. Manifest
//! filenames follow the convention described in [`super::manifest_filename`].

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::platform::PlatformName;

/// Token marking a per-build object key.
pub const BUILD_ID_TOKEN: &str = "-build-";

/// Matches a `-{major}.{minor}.{patch}` version right before the extension.
///
/// - Group 1: the version (e.g., "3.1.3")
/// - Group 2: the extension including the dot (e.g., ".json")
fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)-(\d+\.\d+\.\d+)(\.json|\.yml)$").unwrap())
}

/// Matches the manifest extension, capturing it without the dot.
fn extension_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\.(yml|json)$").unwrap())
}

/// Matches the last `-{word}` segment before a manifest extension.
fn platform_suffix_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)-(\w+)(?:\.json|\.yml)$").unwrap())
}

/// Extract the app ID (first path segment) from an object key.
pub fn app_id_from_path(path: &str) -> &str {
    path.split('/').next().unwrap_or(path)
}

/// Extract the filename (last path segment) from an object key.
pub fn filename_from_path(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Returns true if the key names an update manifest (`.json` or `.yml`).
pub fn is_manifest_file(path: &str) -> bool {
    path.ends_with(".json") || path.ends_with(".yml")
}

/// Returns true if the key names a "latest" channel manifest.
///
/// ```
/// use desktop_cdn::path::is_latest_manifest_file;
///
/// assert!(is_latest_manifest_file("app/td-latest-mac.json"));
/// assert!(is_latest_manifest_file("app/latest.yml"));
/// assert!(!is_latest_manifest_file("app/beta-mac.yml"));
/// assert!(!is_latest_manifest_file("app/latest-mac.dmg"));
/// ```
pub fn is_latest_manifest_file(path: &str) -> bool {
    if !is_manifest_file(path) {
        return false;
    }
    let filename = filename_from_path(path);
    filename.starts_with("td-latest") || filename.starts_with("latest")
}

/// Returns true if the key already names a specific build.
pub fn path_includes_build_id(path: &str) -> bool {
    path.contains(BUILD_ID_TOKEN)
}

/// Extract the semantic version encoded right before the manifest extension.
///
/// # Examples
///
/// ```
/// use desktop_cdn::path::extract_version_from_path;
///
/// assert_eq!(
///     extract_version_from_path("210203cqcj00tw1/td-latest-linux-3.1.3.json"),
///     Some("3.1.3")
/// );
/// assert_eq!(extract_version_from_path("210203cqcj00tw1/td-latest-linux.json"), None);
/// ```
pub fn extract_version_from_path(path: &str) -> Option<&str> {
    version_pattern()
        .captures(path)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Returns true if the key encodes a version before its extension.
pub fn path_includes_version(path: &str) -> bool {
    extract_version_from_path(path).is_some()
}

/// Infer the platform from a "latest" manifest key.
///
/// Windows is the implicit platform, so the suffix-less `td-latest.json`
/// and `latest.yml` mean Windows. Other platforms are named by a
/// `-{platform}` suffix. Anything else cannot be inferred.
///
/// # Examples
///
/// ```
/// use desktop_cdn::path::platform_from_manifest_path;
/// use desktop_cdn::platform::PlatformName;
///
/// assert_eq!(
///     platform_from_manifest_path("210203cqcj00tw1/td-latest-linux.json"),
///     Some(PlatformName::Linux)
/// );
/// assert_eq!(
///     platform_from_manifest_path("210203cqcj00tw1/td-latest.json"),
///     Some(PlatformName::Windows)
/// );
/// assert_eq!(platform_from_manifest_path("210203cqcj00tw1/latest-mac.dmg"), None);
/// ```
pub fn platform_from_manifest_path(path: &str) -> Option<PlatformName> {
    if !is_latest_manifest_file(path) {
        return None;
    }

    let filename = filename_from_path(path);
    if filename == "td-latest.json" || filename == "latest.yml" {
        return Some(PlatformName::Windows);
    }

    let caps = platform_suffix_pattern().captures(path)?;
    match &caps[1] {
        "mac" => Some(PlatformName::Mac),
        "linux" => Some(PlatformName::Linux),
        _ => None,
    }
}

/// Rewrite a manifest key to its per-build form.
///
/// Any version right before the extension is dropped, then
/// `-build-{build_id}` is inserted before the extension.
///
/// # Examples
///
/// ```
/// use desktop_cdn::path::build_path;
///
/// assert_eq!(
///     build_path("app/td-latest-mac-3.1.3.json", "b1"),
///     "app/td-latest-mac-build-b1.json"
/// );
/// assert_eq!(build_path("app/latest.yml", "b2"), "app/latest-build-b2.yml");
/// ```
pub fn build_path(original_path: &str, build_id: &str) -> String {
    let without_version = version_pattern().replace(original_path, |caps: &Captures| {
        caps[2].to_string()
    });

    extension_pattern()
        .replace(&without_version, |caps: &Captures| {
            format!("{}{}.{}", BUILD_ID_TOKEN, build_id, &caps[1])
        })
        .into_owned()
}
