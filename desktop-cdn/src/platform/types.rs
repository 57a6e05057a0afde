//! Platform and architecture identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Operating system family an installer targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformName {
    Linux,
    Mac,
    Windows,
}

impl PlatformName {
    /// All supported platforms.
    pub const ALL: [PlatformName; 3] = [Self::Linux, Self::Mac, Self::Windows];

    /// Name as used in URLs and object keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Mac => "mac",
            Self::Windows => "windows",
        }
    }

    /// Parse a supported platform name, returning `None` otherwise.
    ///
    /// Matching is exact: `"Mac"` is not a supported platform.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }
}

impl fmt::Display for PlatformName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unsupported platform ({})", s))
    }
}

/// CPU architecture of an installer variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    /// 32-bit x86
    Ia32,
    /// 64-bit x86
    X64,
    /// 64-bit ARM (Apple Silicon, Windows on ARM)
    Arm64,
    /// Single artifact covering several architectures
    Universal,
}

impl Arch {
    /// All supported architectures.
    pub const ALL: [Arch; 4] = [Self::Ia32, Self::X64, Self::Arm64, Self::Universal];

    /// Name as used in URLs and manifest keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ia32 => "ia32",
            Self::X64 => "x64",
            Self::Arm64 => "arm64",
            Self::Universal => "universal",
        }
    }

    /// Parse a supported architecture name, returning `None` otherwise.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == s)
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Arch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unsupported architecture ({})", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_parse_exact() {
        assert_eq!(PlatformName::parse("linux"), Some(PlatformName::Linux));
        assert_eq!(PlatformName::parse("mac"), Some(PlatformName::Mac));
        assert_eq!(PlatformName::parse("windows"), Some(PlatformName::Windows));
        assert_eq!(PlatformName::parse("Mac"), None);
        assert_eq!(PlatformName::parse("darwin"), None);
    }

    #[test]
    fn test_platform_from_str_error() {
        let err = "ios".parse::<PlatformName>().unwrap_err();
        assert_eq!(err, "Unsupported platform (ios)");
    }

    #[test]
    fn test_arch_display_matches_parse() {
        for arch in Arch::ALL {
            assert_eq!(Arch::parse(&arch.to_string()), Some(arch));
        }
        assert_eq!(Arch::parse("x86_64"), None);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&(PlatformName::Mac, Arch::Arm64)).unwrap();
        assert_eq!(json, r#"["mac","arm64"]"#);

        let arch: Arch = serde_json::from_str(r#""universal""#).unwrap();
        assert_eq!(arch, Arch::Universal);
    }
}
