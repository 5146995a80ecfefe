use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::errors::DomainError;
use crate::domain::models::admin_page::OptionsPage;
use crate::domain::repositories::admin_menu_repository::{AdminMenuRepository, PageRenderer};

/// Endpoint the settings form posts to unless the host overrides it.
pub const DEFAULT_OPTIONS_ENDPOINT: &str = "/admin/options";

/// In-memory host admin menu: records registered screens and renders them
/// on demand through the renderer supplied at registration.
pub struct MemoryAdminMenuRepository {
    pages: Mutex<Vec<(OptionsPage, Arc<dyn PageRenderer>)>>,
    options_endpoint: String,
}

impl MemoryAdminMenuRepository {
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_OPTIONS_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: &str) -> Self {
        Self {
            pages: Mutex::new(Vec::new()),
            options_endpoint: endpoint.to_string(),
        }
    }

    /// Registered screens in registration order.
    pub async fn registered_pages(&self) -> Vec<OptionsPage> {
        self.pages
            .lock()
            .await
            .iter()
            .map(|(page, _)| page.clone())
            .collect()
    }

    /// Render the screen registered under `slug`.
    pub async fn render_page(&self, slug: &str) -> Option<String> {
        let renderer = {
            let pages = self.pages.lock().await;
            pages
                .iter()
                .find(|(page, _)| page.slug == slug)
                .map(|(_, renderer)| renderer.clone())
        };

        match renderer {
            Some(renderer) => Some(renderer.render().await),
            None => None,
        }
    }
}

impl Default for MemoryAdminMenuRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AdminMenuRepository for MemoryAdminMenuRepository {
    async fn register_options_page(
        &self,
        page: OptionsPage,
        renderer: Arc<dyn PageRenderer>,
    ) -> Result<(), DomainError> {
        tracing::debug!("Registering options page '{}'", page.slug);

        let mut pages = self.pages.lock().await;
        match pages.iter_mut().find(|(existing, _)| existing.slug == page.slug) {
            Some(entry) => *entry = (page, renderer),
            None => pages.push((page, renderer)),
        }

        Ok(())
    }

    async fn options_endpoint(&self) -> Result<String, DomainError> {
        Ok(self.options_endpoint.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedRenderer {
        markup: String,
    }

    #[async_trait]
    impl PageRenderer for FixedRenderer {
        async fn render(&self) -> String {
            self.markup.clone()
        }
    }

    fn page(slug: &str) -> OptionsPage {
        OptionsPage::new("Date Archives", "Date Archives", "manage_options", slug)
    }

    #[tokio::test]
    async fn test_registered_pages_are_rendered_by_slug() {
        let repository = MemoryAdminMenuRepository::new();
        repository
            .register_options_page(
                page("date-archives"),
                Arc::new(FixedRenderer {
                    markup: "<h1>Date Archives</h1>".to_string(),
                }),
            )
            .await
            .unwrap();

        assert_eq!(repository.registered_pages().await.len(), 1);
        assert_eq!(
            repository.render_page("date-archives").await.as_deref(),
            Some("<h1>Date Archives</h1>")
        );
        assert!(repository.render_page("unknown").await.is_none());
    }

    #[tokio::test]
    async fn test_reregistering_a_slug_replaces_the_screen() {
        let repository = MemoryAdminMenuRepository::new();
        for markup in ["first", "second"] {
            repository
                .register_options_page(
                    page("date-archives"),
                    Arc::new(FixedRenderer {
                        markup: markup.to_string(),
                    }),
                )
                .await
                .unwrap();
        }

        assert_eq!(repository.registered_pages().await.len(), 1);
        assert_eq!(
            repository.render_page("date-archives").await.as_deref(),
            Some("second")
        );
    }

    #[tokio::test]
    async fn test_options_endpoint_defaults_and_overrides() {
        let standard = MemoryAdminMenuRepository::new();
        let custom = MemoryAdminMenuRepository::with_endpoint("/settings/commit");

        assert_eq!(
            standard.options_endpoint().await.unwrap(),
            DEFAULT_OPTIONS_ENDPOINT
        );
        assert_eq!(custom.options_endpoint().await.unwrap(), "/settings/commit");
    }
}
