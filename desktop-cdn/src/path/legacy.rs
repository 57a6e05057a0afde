//! Fixups for object keys published under a legacy naming scheme.
//!
//! Per-build electron-builder manifests were once uploaded as
//! `{appId}/latest-build-{buildId}-{platform}.yml` (build before platform).
//! The canonical name is `{appId}/latest-{platform}-build-{buildId}.yml`.

use std::sync::OnceLock;

use regex::Regex;

/// Matches the legacy per-build manifest key.
///
/// - Group 1: app ID
/// - Group 2: build ID
/// - Group 3: platform
fn legacy_build_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^([^/]+)/latest-build-([a-z0-9]+)-([a-z]+)\.yml$").unwrap()
    })
}

/// Rewrite a legacy per-build manifest key to the canonical convention.
///
/// Keys that do not match the legacy shape exactly are returned unchanged.
///
/// # Examples
///
/// ```
/// use desktop_cdn::path::transform_legacy_build_path;
///
/// assert_eq!(
///     transform_legacy_build_path("app/latest-build-abc123-mac.yml"),
///     "app/latest-mac-build-abc123.yml"
/// );
/// assert_eq!(
///     transform_legacy_build_path("app/latest-mac-build-abc123.yml"),
///     "app/latest-mac-build-abc123.yml"
/// );
/// ```
pub fn transform_legacy_build_path(path: &str) -> String {
    match legacy_build_pattern().captures(path) {
        Some(caps) => format!("{}/latest-{}-build-{}.yml", &caps[1], &caps[3], &caps[2]),
        None => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_tokens() {
        assert_eq!(
            transform_legacy_build_path("app/LATEST-BUILD-AB12-Linux.YML"),
            "app/latest-Linux-build-AB12.yml"
        );
    }

    #[test]
    fn test_non_matching_shapes_pass_through() {
        for path in [
            "latest-build-abc-mac.yml",
            "app/nested/latest-build-abc-mac.yml",
            "app/latest-build-abc-mac.json",
            "app/td-latest-build-abc-mac.yml",
            "app/latest-build-abc.yml",
            "app/latest-build-ab_c-mac.yml",
        ] {
            assert_eq!(transform_legacy_build_path(path), path);
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_legacy_shape_is_reordered(
                app_id in "[a-z0-9]{1,16}",
                build_id in "[a-z0-9]{1,16}",
                platform in "[a-z]{1,8}"
            ) {
                let legacy = format!("{}/latest-build-{}-{}.yml", app_id, build_id, platform);
                prop_assert_eq!(
                    transform_legacy_build_path(&legacy),
                    format!("{}/latest-{}-build-{}.yml", app_id, platform, build_id)
                );
            }

            #[test]
            fn test_other_keys_are_identity(path in "[a-z0-9/.-]{0,40}") {
                prop_assume!(!legacy_build_pattern().is_match(&path));
                prop_assert_eq!(transform_legacy_build_path(&path), path);
            }
        }
    }
}
