use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::errors::DomainError;
use crate::domain::models::content_type::ContentType;
use crate::domain::repositories::content_type_repository::ContentTypeRepository;

/// In-memory host content-type registry, seedable for tests and demos.
/// Types are keyed by slug and listed in registration order.
pub struct MemoryContentTypeRepository {
    types: Mutex<Vec<ContentType>>,
}

impl MemoryContentTypeRepository {
    pub fn new() -> Self {
        Self {
            types: Mutex::new(Vec::new()),
        }
    }

    pub fn with_types(types: Vec<ContentType>) -> Self {
        Self {
            types: Mutex::new(types),
        }
    }

    /// Register a type. Re-registering a slug replaces the earlier entry in
    /// place.
    pub async fn register_type(&self, content_type: ContentType) {
        let mut types = self.types.lock().await;
        match types.iter_mut().find(|t| t.slug == content_type.slug) {
            Some(existing) => *existing = content_type,
            None => types.push(content_type),
        }
    }
}

impl Default for MemoryContentTypeRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentTypeRepository for MemoryContentTypeRepository {
    async fn list_public_types(
        &self,
        include_builtin: bool,
    ) -> Result<Vec<ContentType>, DomainError> {
        Ok(self
            .types
            .lock()
            .await
            .iter()
            .filter(|t| t.public && (include_builtin || !t.builtin))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> MemoryContentTypeRepository {
        MemoryContentTypeRepository::with_types(vec![
            ContentType::builtin("post", "Posts"),
            ContentType::new("event", "Events"),
            ContentType::private("draft_note", "Draft Notes"),
            ContentType::new("product", "Products"),
        ])
    }

    #[tokio::test]
    async fn test_listing_without_builtins_keeps_registration_order() {
        let repository = seeded();

        let types = repository.list_public_types(false).await.unwrap();

        let slugs: Vec<&str> = types.iter().map(|t| t.slug.as_str()).collect();
        assert_eq!(slugs, vec!["event", "product"]);
    }

    #[tokio::test]
    async fn test_listing_with_builtins_still_excludes_private_types() {
        let repository = seeded();

        let types = repository.list_public_types(true).await.unwrap();

        let slugs: Vec<&str> = types.iter().map(|t| t.slug.as_str()).collect();
        assert_eq!(slugs, vec!["post", "event", "product"]);
    }

    #[tokio::test]
    async fn test_reregistering_a_slug_replaces_the_entry() {
        let repository = seeded();

        repository
            .register_type(ContentType::new("event", "Calendar Events"))
            .await;

        let types = repository.list_public_types(false).await.unwrap();
        assert_eq!(types[0].label, "Calendar Events");
        assert_eq!(types.len(), 2);
    }
}
