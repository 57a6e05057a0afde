//! CPU architecture resolution.
//!
//! Browsers do not report the CPU of a Mac, so the architecture is inferred
//! from the macOS version in the user-agent: versions that can run on Apple
//! Silicon get the universal build, older ones get x64.

use super::types::Arch;
use crate::error::{ResolveError, ResolveResult};

/// macOS version tokens treated as Apple-Silicon capable.
///
/// macOS 10.15 itself never ran on ARM, but Safari and Chrome freeze the
/// reported version at 10.15 on macOS 11 and later
/// (<https://bugs.webkit.org/show_bug.cgi?id=216593>), so 10.15 is included.
/// Underscore and dot spellings cover Safari/Chrome and Firefox respectively.
const ARM_COMPATIBLE_MACOS_TOKENS: &[&str] = &[
    "Mac OS X 10_15",
    "Mac OS X 10.15",
    "Mac OS X 11",
    "Mac OS X 12",
    "Mac OS X 13",
    "Mac OS X 14",
    "Mac OS X 15",
];

/// Architecture detected for a Mac client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacArch {
    /// Architecture to serve.
    pub arch: Arch,
    /// Whether the universal installer artifact may be offered.
    pub universal_installer_supported: bool,
}

/// Returns true if the user-agent reports a macOS version that may be
/// running on Apple Silicon.
pub fn detect_mac_arch_eligibility(user_agent: &str) -> bool {
    ARM_COMPATIBLE_MACOS_TOKENS
        .iter()
        .any(|token| user_agent.contains(token))
}

/// Resolve the architecture for a Mac client from its user-agent.
///
/// # Examples
///
/// ```
/// use desktop_cdn::platform::{resolve_mac_arch, Arch};
///
/// let modern = resolve_mac_arch("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)");
/// assert_eq!(modern.arch, Arch::Universal);
/// assert!(modern.universal_installer_supported);
///
/// let yosemite = resolve_mac_arch("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_10_5)");
/// assert_eq!(yosemite.arch, Arch::X64);
/// assert!(!yosemite.universal_installer_supported);
/// ```
pub fn resolve_mac_arch(user_agent: &str) -> MacArch {
    if detect_mac_arch_eligibility(user_agent) {
        MacArch {
            arch: Arch::Universal,
            universal_installer_supported: true,
        }
    } else {
        MacArch {
            arch: Arch::X64,
            universal_installer_supported: false,
        }
    }
}

/// Parse an explicitly requested architecture.
///
/// # Errors
///
/// Returns `BadRequest` for anything other than `ia32`, `x64`, `arm64` or
/// `universal`.
pub fn parse_arch(explicit: &str) -> ResolveResult<Arch> {
    Arch::parse(explicit)
        .ok_or_else(|| ResolveError::BadRequest(format!("Unsupported architecture ({})", explicit)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalina_style_agents_are_universal() {
        for ua in [
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15",
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:121.0) Gecko/20100101",
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 11_2_3) AppleWebKit/605.1.15",
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_1) AppleWebKit/605.1.15",
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 15_0) AppleWebKit/605.1.15",
        ] {
            let result = resolve_mac_arch(ua);
            assert_eq!(result.arch, Arch::Universal, "{}", ua);
            assert!(result.universal_installer_supported, "{}", ua);
        }
    }

    #[test]
    fn test_older_macos_is_x64() {
        for ua in [
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_10)",
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_14_6)",
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.9; rv:50.0)",
        ] {
            assert_eq!(
                resolve_mac_arch(ua),
                MacArch {
                    arch: Arch::X64,
                    universal_installer_supported: false,
                },
                "{}",
                ua
            );
        }
    }

    #[test]
    fn test_agent_without_version_is_x64() {
        assert_eq!(resolve_mac_arch("").arch, Arch::X64);
        assert!(!detect_mac_arch_eligibility("electron-builder"));
    }

    #[test]
    fn test_parse_arch() {
        assert_eq!(parse_arch("arm64").unwrap(), Arch::Arm64);
        assert_eq!(parse_arch("ia32").unwrap(), Arch::Ia32);

        let err = parse_arch("x86").unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_string(), "Unsupported architecture (x86)");
    }
}
