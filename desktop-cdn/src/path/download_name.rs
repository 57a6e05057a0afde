//! Client-facing download filenames.
//!
//! Installers are stored under build-specific names such as
//! `App Setup 1.2.0 - Build 2301abc-x64.exe` or `app-1.2.0-build-2301abc.dmg`.
//! Users who asked for "the latest" should not see the build token, so it is
//! stripped unless the request named a build or wants the file verbatim.

use std::sync::OnceLock;

use regex::Regex;

use super::utils::{filename_from_path, BUILD_ID_TOKEN};

fn dashed_build_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"-build-\w+-?").unwrap())
}

fn spaced_build_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"Build \w+-").unwrap())
}

/// Derive the filename presented to the client for an object key.
///
/// # Arguments
///
/// * `object_key` - The resolved object key
/// * `is_direct_download` - The client asked for this exact file
/// * `build_id` - Build ID named by the request, if any
///
/// # Examples
///
/// ```
/// use desktop_cdn::path::make_download_filename;
///
/// assert_eq!(
///     make_download_filename("app/app-1.2.0-build-2301abc.dmg", false, None),
///     "app-1.2.0.dmg"
/// );
/// assert_eq!(
///     make_download_filename("app/app-1.2.0-build-2301abc.dmg", false, Some("2301abc")),
///     "app-1.2.0-build-2301abc.dmg"
/// );
/// ```
pub fn make_download_filename(
    object_key: &str,
    is_direct_download: bool,
    build_id: Option<&str>,
) -> String {
    let filename = filename_from_path(object_key);
    let names_build = build_id.is_some_and(|id| !id.is_empty());

    if is_direct_download || names_build {
        return filename.to_string();
    }

    if filename.contains(BUILD_ID_TOKEN) {
        dashed_build_pattern().replace(filename, "").into_owned()
    } else {
        spaced_build_pattern().replace(filename, "").into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_spaced_build_token() {
        assert_eq!(
            make_download_filename("app/App Setup 1.2.0 - Build 2301abc-x64.exe", false, None),
            "App Setup 1.2.0 - x64.exe"
        );
    }

    #[test]
    fn test_strips_trailing_separator_of_dashed_token() {
        assert_eq!(
            make_download_filename("app/App-1.2.0-build-2301abc-arm64.dmg", false, None),
            "App-1.2.0arm64.dmg"
        );
    }

    #[test]
    fn test_direct_download_keeps_name() {
        assert_eq!(
            make_download_filename("app/App Setup 1.2.0 - Build 2301abc-x64.exe", true, None),
            "App Setup 1.2.0 - Build 2301abc-x64.exe"
        );
    }

    #[test]
    fn test_name_without_build_token_unchanged() {
        assert_eq!(make_download_filename("app/latest.yml", false, None), "latest.yml");
        assert_eq!(make_download_filename("latest.yml", false, Some("")), "latest.yml");
    }
}
