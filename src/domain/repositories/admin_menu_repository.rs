use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::DomainError;
use crate::domain::models::admin_page::OptionsPage;

/// Produces the markup for a registered admin screen on demand.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    async fn render(&self) -> String;
}

/// Host admin menu.
#[async_trait]
pub trait AdminMenuRepository: Send + Sync {
    /// Register a screen under the host's settings menu.
    async fn register_options_page(
        &self,
        page: OptionsPage,
        renderer: Arc<dyn PageRenderer>,
    ) -> Result<(), DomainError>;

    /// URL the settings form posts to.
    async fn options_endpoint(&self) -> Result<String, DomainError>;
}
