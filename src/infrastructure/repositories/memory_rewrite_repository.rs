use async_trait::async_trait;
use chrono::NaiveDate;
use percent_encoding::percent_decode_str;
use regex::Regex;
use tokio::sync::Mutex;

use crate::domain::errors::DomainError;
use crate::domain::models::rewrite::{RewriteRule, RouteMatch, RulePriority};
use crate::domain::repositories::rewrite_repository::RewriteRepository;
use crate::infrastructure::logging::logger;

/// A staged rule compiled for matching.
struct CompiledRule {
    rule: RewriteRule,
    regex: Regex,
}

#[derive(Default)]
struct TableState {
    top: Vec<RewriteRule>,
    bottom: Vec<RewriteRule>,
    active: Option<Vec<CompiledRule>>,
}

impl TableState {
    /// Compile the staged rules in match order, top tier first. A rule
    /// whose pattern fails to compile is skipped with a warning.
    fn compile(&self) -> Vec<CompiledRule> {
        self.top
            .iter()
            .chain(self.bottom.iter())
            .filter_map(|rule| match Regex::new(&rule.pattern) {
                Ok(regex) => Some(CompiledRule {
                    rule: rule.clone(),
                    regex,
                }),
                Err(error) => {
                    logger::warn(&format!(
                        "Skipping rule with invalid pattern '{}': {}",
                        rule.pattern, error
                    ));
                    None
                }
            })
            .collect()
    }
}

/// In-memory host dispatch table with the lazy regeneration cycle real
/// hosts use: registrations accumulate in a staged set per request cycle,
/// and the active table is only re-materialized from that set after an
/// invalidation. Until then the active table keeps serving, so staged
/// changes become routable one invalidation later.
pub struct MemoryRewriteRepository {
    state: Mutex<TableState>,
}

impl MemoryRewriteRepository {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(TableState::default()),
        }
    }

    /// Start a new request cycle: discard staged registrations so the
    /// cycle's hooks can re-stage from scratch. The active table keeps
    /// serving until the next invalidation.
    pub async fn begin_request_cycle(&self) {
        let mut state = self.state.lock().await;
        state.top.clear();
        state.bottom.clear();
    }

    /// Match a request path against the active table, materializing it
    /// from the staged rules first if it was invalidated.
    ///
    /// The path is percent-decoded and its leading slash stripped before
    /// matching. A rule whose substituted query names an impossible
    /// calendar date is passed over in favor of later rules.
    pub async fn resolve(&self, path: &str) -> Option<RouteMatch> {
        let decoded = percent_decode_str(path).decode_utf8_lossy();
        let candidate = decoded.trim_start_matches('/');

        let mut state = self.state.lock().await;
        if state.active.is_none() {
            let compiled = state.compile();
            tracing::debug!("Materialized dispatch table with {} rules", compiled.len());
            state.active = Some(compiled);
        }

        let active = state.active.as_deref()?;
        for compiled in active {
            if let Some(captures) = compiled.regex.captures(candidate) {
                let mut query = String::new();
                captures.expand(&compiled.rule.query, &mut query);

                let route = RouteMatch {
                    pattern: compiled.rule.pattern.clone(),
                    query,
                };
                if !plausible_archive_date(&route) {
                    tracing::debug!(
                        "Skipping match for '{}': impossible calendar date",
                        compiled.rule.pattern
                    );
                    continue;
                }

                return Some(route);
            }
        }

        None
    }

    /// Staged rules in match order, top tier first.
    pub async fn staged_rules(&self) -> Vec<RewriteRule> {
        let state = self.state.lock().await;
        state
            .top
            .iter()
            .chain(state.bottom.iter())
            .cloned()
            .collect()
    }

    /// Whether an active table is currently materialized.
    pub async fn is_materialized(&self) -> bool {
        self.state.lock().await.active.is_some()
    }
}

impl Default for MemoryRewriteRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RewriteRepository for MemoryRewriteRepository {
    async fn register_rule(&self, rule: RewriteRule) -> Result<(), DomainError> {
        let mut state = self.state.lock().await;
        let tier = match rule.priority {
            RulePriority::Top => &mut state.top,
            RulePriority::Bottom => &mut state.bottom,
        };

        // Staged rules are keyed by pattern: re-registration overwrites.
        match tier.iter_mut().find(|staged| staged.pattern == rule.pattern) {
            Some(staged) => *staged = rule,
            None => tier.push(rule),
        }

        Ok(())
    }

    async fn rebuild(&self) -> Result<(), DomainError> {
        let mut state = self.state.lock().await;
        state.active = None;
        tracing::debug!("Invalidated active dispatch table");

        Ok(())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        let mut state = self.state.lock().await;
        state.top.clear();
        state.bottom.clear();
        state.active = None;
        tracing::debug!("Cleared dispatch table");

        Ok(())
    }
}

/// Whether the year/month/day arguments of a substituted query form a real
/// calendar date. Queries without a day component pass on a month range
/// check alone; queries without date arguments always pass.
fn plausible_archive_date(route: &RouteMatch) -> bool {
    let year = route.query_arg("year").and_then(|v| v.parse::<i32>().ok());
    let month = route
        .query_arg("monthnum")
        .and_then(|v| v.parse::<u32>().ok());
    let day = route.query_arg("day").and_then(|v| v.parse::<u32>().ok());

    match (year, month, day) {
        (Some(year), Some(month), Some(day)) => {
            NaiveDate::from_ymd_opt(year, month, day).is_some()
        }
        (_, Some(month), None) => (1..=12).contains(&month),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::rewrite::date_archive_rules;

    async fn table_with_event_rules() -> MemoryRewriteRepository {
        let repository = MemoryRewriteRepository::new();
        for rule in date_archive_rules("event") {
            repository.register_rule(rule).await.unwrap();
        }
        repository
    }

    #[tokio::test]
    async fn test_resolve_substitutes_captures_into_the_query() {
        let repository = table_with_event_rules().await;

        let route = repository.resolve("/event/2025/03/14/").await.unwrap();

        assert_eq!(route.query, "post_type=event&year=2025&monthnum=03&day=14");
        assert_eq!(route.query_arg("day").as_deref(), Some("14"));
    }

    #[tokio::test]
    async fn test_resolve_matches_month_and_year_archives() {
        let repository = table_with_event_rules().await;

        let month = repository.resolve("/event/2025/03/").await.unwrap();
        let year = repository.resolve("/event/2025").await.unwrap();

        assert_eq!(month.query, "post_type=event&year=2025&monthnum=03");
        assert_eq!(year.query, "post_type=event&year=2025");
    }

    #[tokio::test]
    async fn test_resolve_rejects_unknown_paths() {
        let repository = table_with_event_rules().await;

        assert!(repository.resolve("/product/2025/03/").await.is_none());
        assert!(repository.resolve("/event/25/03/").await.is_none());
        assert!(repository.resolve("/event/2025/03/99/").await.is_none());
        assert!(repository.resolve("/about").await.is_none());
    }

    #[tokio::test]
    async fn test_resolve_skips_impossible_calendar_dates() {
        let repository = table_with_event_rules().await;

        // Pattern-valid but not a real date.
        assert!(repository.resolve("/event/2025/02/31/").await.is_none());
        assert!(repository.resolve("/event/2023/02/29/").await.is_none());
        // Leap day.
        assert!(repository.resolve("/event/2024/02/29/").await.is_some());
    }

    #[tokio::test]
    async fn test_resolve_percent_decodes_the_path() {
        let repository = table_with_event_rules().await;

        let route = repository.resolve("/event/2025/03/1%34/").await.unwrap();

        assert_eq!(route.query_arg("day").as_deref(), Some("14"));
    }

    #[tokio::test]
    async fn test_top_tier_rules_win_over_bottom_tier() {
        let repository = table_with_event_rules().await;
        repository
            .register_rule(RewriteRule::bottom(
                "^event/(.*)$".to_string(),
                "fallback=$1".to_string(),
            ))
            .await
            .unwrap();

        let date = repository.resolve("/event/2025/03/14/").await.unwrap();
        let other = repository.resolve("/event/something-else").await.unwrap();

        assert!(date.query.starts_with("post_type=event"));
        assert_eq!(other.query, "fallback=something-else");
    }

    #[tokio::test]
    async fn test_reregistering_a_pattern_overwrites_in_place() {
        let repository = MemoryRewriteRepository::new();
        repository
            .register_rule(RewriteRule::top("^a/(.*)$".to_string(), "v=1".to_string()))
            .await
            .unwrap();
        repository
            .register_rule(RewriteRule::top("^a/(.*)$".to_string(), "v=2".to_string()))
            .await
            .unwrap();

        let staged = repository.staged_rules().await;
        assert_eq!(staged.len(), 1);
        assert_eq!(staged[0].query, "v=2");
    }

    #[tokio::test]
    async fn test_active_table_serves_until_invalidated() {
        let repository = table_with_event_rules().await;

        // First resolution materializes the active table.
        assert!(repository.resolve("/event/2025/03/").await.is_some());

        // A new cycle stages a different rule set; the active table is
        // untouched until the next invalidation.
        repository.begin_request_cycle().await;
        for rule in date_archive_rules("product") {
            repository.register_rule(rule).await.unwrap();
        }
        assert!(repository.resolve("/event/2025/03/").await.is_some());
        assert!(repository.resolve("/product/2025/03/").await.is_none());

        repository.rebuild().await.unwrap();
        assert!(repository.resolve("/event/2025/03/").await.is_none());
        assert!(repository.resolve("/product/2025/03/").await.is_some());
    }

    #[tokio::test]
    async fn test_begin_request_cycle_discards_staged_rules_only() {
        let repository = table_with_event_rules().await;
        assert!(repository.resolve("/event/2025/03/").await.is_some());

        repository.begin_request_cycle().await;

        assert!(repository.staged_rules().await.is_empty());
        assert!(repository.is_materialized().await);
    }

    #[tokio::test]
    async fn test_clear_drops_staged_and_active_rules() {
        let repository = table_with_event_rules().await;
        assert!(repository.resolve("/event/2025/03/").await.is_some());

        repository.clear().await.unwrap();

        assert!(repository.staged_rules().await.is_empty());
        assert!(repository.resolve("/event/2025/03/").await.is_none());
    }

    #[tokio::test]
    async fn test_invalid_patterns_are_skipped_when_materializing() {
        let repository = MemoryRewriteRepository::new();
        repository
            .register_rule(RewriteRule::top("^(unclosed$".to_string(), "x=1".to_string()))
            .await
            .unwrap();
        for rule in date_archive_rules("event") {
            repository.register_rule(rule).await.unwrap();
        }

        assert!(repository.resolve("/event/2025/03/").await.is_some());
    }

    #[test]
    fn test_plausible_archive_date_ignores_rules_without_date_arguments() {
        let route = RouteMatch {
            pattern: "^event/(.*)$".to_string(),
            query: "fallback=x".to_string(),
        };

        assert!(plausible_archive_date(&route));
    }
}
