use async_trait::async_trait;

use crate::domain::errors::DomainError;
use crate::domain::models::rewrite::RewriteRule;

/// Host dispatch table for pattern-to-query routing rules.
///
/// Registration is staged: rules accumulate during a request cycle and only
/// become routable once the host materializes its active table. `rebuild`
/// discards the active table so the next resolution re-materializes it from
/// the staged rules; `clear` drops staged and active rules both.
#[async_trait]
pub trait RewriteRepository: Send + Sync {
    /// Stage one rule. Re-registering a pattern overwrites the staged entry
    /// in place.
    async fn register_rule(&self, rule: RewriteRule) -> Result<(), DomainError>;

    /// Invalidate the active table; it is rebuilt from staged rules on the
    /// next resolution.
    async fn rebuild(&self) -> Result<(), DomainError>;

    /// Drop every rule, staged and active.
    async fn clear(&self) -> Result<(), DomainError>;
}
