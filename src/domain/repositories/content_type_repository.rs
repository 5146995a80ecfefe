use async_trait::async_trait;

use crate::domain::errors::DomainError;
use crate::domain::models::content_type::ContentType;

/// Host content-type registry.
#[async_trait]
pub trait ContentTypeRepository: Send + Sync {
    /// List publicly queryable types in registration order, optionally
    /// including the host's built-in ones.
    async fn list_public_types(
        &self,
        include_builtin: bool,
    ) -> Result<Vec<ContentType>, DomainError>;
}
