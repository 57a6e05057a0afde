//! Operating system detection from an explicit argument or a user-agent.
//!
//! User-agent sniffing is heuristic substring matching. All of it lives in
//! [`detect_os`] so the heuristics can be revised without touching callers.

use super::types::PlatformName;

/// Tokens that identify iOS devices, whose user-agents also claim "Mac OS X".
const IOS_TOKENS: &[&str] = &["iPhone", "iPad", "iPod"];

/// Tokens identifying macOS.
const MAC_TOKENS: &[&str] = &["Macintosh", "Mac OS X", "Mac_PowerPC"];

/// Tokens identifying Windows.
const WINDOWS_TOKENS: &[&str] = &["Windows", "Win64", "WOW64", "Win32"];

/// Tokens identifying ChromeOS.
const CHROME_OS_TOKENS: &[&str] = &["CrOS"];

/// Tokens identifying desktop Linux.
const LINUX_TOKENS: &[&str] = &["Linux", "X11"];

/// Detect the operating system family from a user-agent string.
///
/// Returns `None` when no desktop OS can be identified (mobile devices,
/// bots, empty strings).
///
/// # Examples
///
/// ```
/// use desktop_cdn::platform::{detect_os, PlatformName};
///
/// let safari = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15";
/// assert_eq!(detect_os(safari), Some(PlatformName::Mac));
///
/// let chromebook = "Mozilla/5.0 (X11; CrOS x86_64 14541.0.0) AppleWebKit/537.36";
/// assert_eq!(detect_os(chromebook), Some(PlatformName::Linux));
///
/// assert_eq!(detect_os("curl/8.4.0"), None);
/// ```
pub fn detect_os(user_agent: &str) -> Option<PlatformName> {
    let has = |tokens: &[&str]| tokens.iter().any(|t| user_agent.contains(t));

    if has(MAC_TOKENS) && !has(IOS_TOKENS) {
        Some(PlatformName::Mac)
    } else if has(WINDOWS_TOKENS) {
        Some(PlatformName::Windows)
    } else if has(CHROME_OS_TOKENS) || (has(LINUX_TOKENS) && !user_agent.contains("Android")) {
        Some(PlatformName::Linux)
    } else {
        None
    }
}

/// Resolve the target platform for a download.
///
/// An explicit, supported platform always wins and is not checked against
/// the user-agent. Otherwise the user-agent is sniffed, defaulting to
/// Windows when nothing matches.
///
/// # Examples
///
/// ```
/// use desktop_cdn::platform::{resolve_platform, PlatformName};
///
/// let ua = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";
/// assert_eq!(resolve_platform(Some("linux"), ua), PlatformName::Linux);
/// assert_eq!(resolve_platform(None, ua), PlatformName::Windows);
/// assert_eq!(resolve_platform(None, ""), PlatformName::Windows);
/// ```
pub fn resolve_platform(explicit: Option<&str>, user_agent: &str) -> PlatformName {
    if let Some(platform) = explicit.and_then(PlatformName::parse) {
        return platform;
    }

    detect_os(user_agent).unwrap_or(PlatformName::Windows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME_WINDOWS: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    const FIREFOX_MAC: &str =
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:121.0) Gecko/20100101 Firefox/121.0";
    const FIREFOX_LINUX: &str =
        "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0";
    const IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_1 like Mac OS X) AppleWebKit/605.1.15";
    const ANDROID: &str =
        "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 Chrome/120.0.0.0 Mobile";
    const ELECTRON_UPDATER: &str = "electron-builder";

    #[test]
    fn test_detect_desktop_browsers() {
        assert_eq!(detect_os(CHROME_WINDOWS), Some(PlatformName::Windows));
        assert_eq!(detect_os(FIREFOX_MAC), Some(PlatformName::Mac));
        assert_eq!(detect_os(FIREFOX_LINUX), Some(PlatformName::Linux));
    }

    #[test]
    fn test_detect_ignores_mobile() {
        assert_eq!(detect_os(IPHONE), None);
        assert_eq!(detect_os(ANDROID), None);
    }

    #[test]
    fn test_unknown_agent_defaults_to_windows() {
        assert_eq!(resolve_platform(None, ELECTRON_UPDATER), PlatformName::Windows);
        assert_eq!(resolve_platform(None, IPHONE), PlatformName::Windows);
    }

    #[test]
    fn test_explicit_platform_wins_over_agent() {
        assert_eq!(resolve_platform(Some("mac"), CHROME_WINDOWS), PlatformName::Mac);
        assert_eq!(
            resolve_platform(Some("windows"), FIREFOX_LINUX),
            PlatformName::Windows
        );
    }

    #[test]
    fn test_unsupported_explicit_platform_falls_back_to_agent() {
        assert_eq!(resolve_platform(Some("beos"), FIREFOX_MAC), PlatformName::Mac);
        assert_eq!(resolve_platform(Some(""), FIREFOX_LINUX), PlatformName::Linux);
    }
}
