use serde::{Deserialize, Serialize};

/// Pattern fragment matching a 4-digit year.
pub const YEAR_PATTERN: &str = "([0-9]{4})";

/// Pattern fragment matching a 2-digit month, `01` through `12`.
pub const MONTH_PATTERN: &str = "(0[1-9]|1[0-2])";

/// Pattern fragment matching a 2-digit day, `01` through `31`.
pub const DAY_PATTERN: &str = "(0[1-9]|[12][0-9]|3[01])";

/// Priority tier of a rule in the host dispatch table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RulePriority {
    /// Attempted before the host's own generated rules.
    Top,
    /// Attempted after the host's own generated rules.
    Bottom,
}

/// One pattern-to-query mapping in the host dispatch table.
///
/// Rules are ephemeral: they are re-derived from configuration on every
/// request-cycle start and never persisted by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteRule {
    /// Anchored match pattern applied to the request path (no leading slash).
    pub pattern: String,
    /// Query template with `$1`-style references into the pattern captures.
    pub query: String,
    /// Tier the rule is registered at.
    pub priority: RulePriority,
}

impl RewriteRule {
    pub fn top(pattern: String, query: String) -> Self {
        Self {
            pattern,
            query,
            priority: RulePriority::Top,
        }
    }

    pub fn bottom(pattern: String, query: String) -> Self {
        Self {
            pattern,
            query,
            priority: RulePriority::Bottom,
        }
    }
}

/// Derive the three date-archive rules for one content type, most specific
/// first: day archive, month archive, year archive.
///
/// The slug must already be key-sanitized; it is interpolated into the
/// pattern verbatim. Each pattern anchors at the path start and allows an
/// optional trailing slash.
pub fn date_archive_rules(slug: &str) -> Vec<RewriteRule> {
    vec![
        RewriteRule::top(
            format!("^{slug}/{YEAR_PATTERN}/{MONTH_PATTERN}/{DAY_PATTERN}/?$"),
            format!("post_type={slug}&year=$1&monthnum=$2&day=$3"),
        ),
        RewriteRule::top(
            format!("^{slug}/{YEAR_PATTERN}/{MONTH_PATTERN}/?$"),
            format!("post_type={slug}&year=$1&monthnum=$2"),
        ),
        RewriteRule::top(
            format!("^{slug}/{YEAR_PATTERN}/?$"),
            format!("post_type={slug}&year=$1"),
        ),
    ]
}

/// A resolved request path: the rule pattern that matched and the query it
/// produced after capture substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteMatch {
    pub pattern: String,
    pub query: String,
}

impl RouteMatch {
    /// Decode the query into ordered key/value pairs.
    pub fn query_args(&self) -> Vec<(String, String)> {
        url::form_urlencoded::parse(self.query.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect()
    }

    /// Look up a single query argument by name.
    pub fn query_arg(&self, name: &str) -> Option<String> {
        self.query_args()
            .into_iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}
