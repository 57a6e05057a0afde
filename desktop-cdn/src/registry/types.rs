//! Registry documents published alongside the builds of an app.

use serde::{Deserialize, Serialize};

use crate::platform::PlatformName;

/// A release redirection rule from `desktop-releases.json`.
///
/// Rules are tagged by their `rule` field. Fields a rule needs but the
/// document omits default to empty, which makes the rule non-qualifying
/// rather than the whole registry unreadable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum RedirectionRule {
    /// Pin every request to a build.
    #[serde(rename_all = "camelCase")]
    Build {
        #[serde(default)]
        build_id: String,
    },

    /// Pin requests from listed client IPs to a build.
    #[serde(rename_all = "camelCase")]
    BuildByIp {
        #[serde(default)]
        build_id: String,
        #[serde(default)]
        ip_list: Vec<String>,
    },

    /// Pin requests for manifests of listed platforms to a build.
    #[serde(rename_all = "camelCase")]
    BuildByPlatform {
        #[serde(default)]
        build_id: String,
        #[serde(default)]
        platforms: Vec<PlatformName>,
    },

    /// Point listed client IPs at a different update feed.
    #[serde(rename_all = "camelCase")]
    AppByIp {
        #[serde(default)]
        feed_url: String,
        #[serde(default)]
        ip_list: Vec<String>,
    },
}

impl RedirectionRule {
    /// Short rule name as written in the registry.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Build { .. } => "build",
            Self::BuildByIp { .. } => "buildByIp",
            Self::BuildByPlatform { .. } => "buildByPlatform",
            Self::AppByIp { .. } => "appByIp",
        }
    }
}

/// Contents of `desktop-releases.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseRegistry {
    /// Build currently served as "latest".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_release_build_id: Option<String>,

    /// Explicit redirection rules, in evaluation order.
    #[serde(default)]
    pub release_redirections: Vec<RedirectionRule>,
}

impl ReleaseRegistry {
    /// Rules in evaluation order, with the latest-release pointer appended
    /// as a trailing `build` rule.
    ///
    /// ```
    /// use desktop_cdn::registry::{RedirectionRule, ReleaseRegistry};
    ///
    /// let registry = ReleaseRegistry {
    ///     latest_release_build_id: Some("b2".to_string()),
    ///     release_redirections: vec![],
    /// };
    /// assert_eq!(
    ///     registry.effective_rules(),
    ///     vec![RedirectionRule::Build { build_id: "b2".to_string() }]
    /// );
    /// ```
    pub fn effective_rules(&self) -> Vec<RedirectionRule> {
        let mut rules = self.release_redirections.clone();
        if let Some(build_id) = self
            .latest_release_build_id
            .as_deref()
            .filter(|id| !id.is_empty())
        {
            rules.push(RedirectionRule::Build {
                build_id: build_id.to_string(),
            });
        }
        rules
    }
}

/// One entry of `desktop-builds.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildEntry {
    pub id: String,
    pub version: String,
    #[serde(default)]
    pub is_released: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Contents of `desktop-builds.json`, in publication order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildRegistry {
    pub builds: Vec<BuildEntry>,
}

impl BuildRegistry {
    /// Wrap a list of builds.
    pub fn new(builds: Vec<BuildEntry>) -> Self {
        Self { builds }
    }

    /// ID of the first released build with exactly this version.
    pub fn build_id_for_version(&self, version: &str) -> Option<&str> {
        self.builds
            .iter()
            .find(|build| build.is_released && build.version == version)
            .map(|build| build.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_decode_by_tag() {
        let json = r#"[
            {"rule": "build", "buildId": "b1"},
            {"rule": "buildByIp", "buildId": "b2", "ipList": ["1.1.1.1"]},
            {"rule": "buildByPlatform", "buildId": "b3", "platforms": ["mac", "linux"]},
            {"rule": "appByIp", "feedUrl": "https://feed.example", "ipList": []}
        ]"#;
        let rules: Vec<RedirectionRule> = serde_json::from_str(json).unwrap();

        assert_eq!(
            rules,
            vec![
                RedirectionRule::Build {
                    build_id: "b1".into()
                },
                RedirectionRule::BuildByIp {
                    build_id: "b2".into(),
                    ip_list: vec!["1.1.1.1".into()],
                },
                RedirectionRule::BuildByPlatform {
                    build_id: "b3".into(),
                    platforms: vec![PlatformName::Mac, PlatformName::Linux],
                },
                RedirectionRule::AppByIp {
                    feed_url: "https://feed.example".into(),
                    ip_list: vec![],
                },
            ]
        );
    }

    #[test]
    fn test_rule_with_missing_fields_decodes_empty() {
        let rule: RedirectionRule = serde_json::from_str(r#"{"rule": "buildByIp"}"#).unwrap();
        assert_eq!(
            rule,
            RedirectionRule::BuildByIp {
                build_id: String::new(),
                ip_list: vec![],
            }
        );
        assert_eq!(rule.name(), "buildByIp");
    }

    #[test]
    fn test_unknown_rule_is_rejected() {
        let result: Result<RedirectionRule, _> =
            serde_json::from_str(r#"{"rule": "everything", "buildId": "b1"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_release_registry_defaults() {
        let registry: ReleaseRegistry = serde_json::from_str("{}").unwrap();
        assert_eq!(registry, ReleaseRegistry::default());
        assert!(registry.effective_rules().is_empty());
    }

    #[test]
    fn test_effective_rules_append_latest_last() {
        let registry: ReleaseRegistry = serde_json::from_str(
            r#"{
                "latestReleaseBuildId": "latest1",
                "releaseRedirections": [{"rule": "buildByIp", "buildId": "pin", "ipList": ["10.0.0.1"]}]
            }"#,
        )
        .unwrap();

        let rules = registry.effective_rules();
        assert_eq!(rules.len(), 2);
        assert_eq!(
            rules[1],
            RedirectionRule::Build {
                build_id: "latest1".into()
            }
        );
    }

    #[test]
    fn test_effective_rules_skip_empty_latest() {
        let registry = ReleaseRegistry {
            latest_release_build_id: Some(String::new()),
            release_redirections: vec![],
        };
        assert!(registry.effective_rules().is_empty());
    }

    #[test]
    fn test_build_id_for_version_requires_release() {
        let registry: BuildRegistry = serde_json::from_str(
            r#"[
                {"id": "draft", "version": "1.2.0", "isReleased": false},
                {"id": "rel", "version": "1.2.0", "isReleased": true, "createdAt": "2024-01-01"},
                {"id": "later", "version": "1.2.0", "isReleased": true}
            ]"#,
        )
        .unwrap();

        assert_eq!(registry.build_id_for_version("1.2.0"), Some("rel"));
        assert_eq!(registry.build_id_for_version("1.3.0"), None);
    }
}
