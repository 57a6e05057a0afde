//! Redirection rule evaluation.

use tracing::trace;

use crate::path::platform_from_manifest_path;
use crate::registry::RedirectionRule;

/// Request facts a rule can be gated on.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// Client IP as seen by the front door, empty if unknown.
    pub client_ip: &'a str,
    /// Object key being resolved.
    pub original_path: &'a str,
}

/// Pick the build ID the rules pin this request to.
///
/// Rules are evaluated in order and the first qualifying rule wins. A rule
/// without a build ID never qualifies. `appByIp` rules are reserved and
/// never produce a build ID.
///
/// # Examples
///
/// ```
/// use desktop_cdn::redirect::{used_redirection, RuleContext};
/// use desktop_cdn::registry::RedirectionRule;
/// use desktop_cdn::platform::PlatformName;
///
/// let rules = vec![
///     RedirectionRule::BuildByPlatform {
///         build_id: "b1".into(),
///         platforms: vec![PlatformName::Mac],
///     },
///     RedirectionRule::Build { build_id: "b2".into() },
/// ];
/// let ctx = RuleContext { client_ip: "", original_path: "app/td-latest-mac.json" };
/// assert_eq!(used_redirection(&rules, &ctx), Some("b1"));
/// ```
pub fn used_redirection<'r>(rules: &'r [RedirectionRule], ctx: &RuleContext<'_>) -> Option<&'r str> {
    rules.iter().find_map(|rule| {
        let build_id = qualifying_build_id(rule, ctx)?;
        trace!(rule = rule.name(), build_id = build_id, "Rule qualified");
        Some(build_id)
    })
}

fn qualifying_build_id<'r>(rule: &'r RedirectionRule, ctx: &RuleContext<'_>) -> Option<&'r str> {
    match rule {
        RedirectionRule::Build { build_id } => non_empty(build_id),
        RedirectionRule::BuildByIp { build_id, ip_list } => {
            if ip_list.iter().any(|ip| ip == ctx.client_ip) {
                non_empty(build_id)
            } else {
                None
            }
        }
        RedirectionRule::BuildByPlatform {
            build_id,
            platforms,
        } => {
            let platform = platform_from_manifest_path(ctx.original_path)?;
            if platforms.contains(&platform) {
                non_empty(build_id)
            } else {
                None
            }
        }
        // Feed redirection is not served by this resolver.
        RedirectionRule::AppByIp { .. } => None,
    }
}

fn non_empty(build_id: &str) -> Option<&str> {
    (!build_id.is_empty()).then_some(build_id)
}
