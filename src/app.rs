use std::sync::Arc;

use serde_json::Value;

use crate::application::dto::settings_dto::ArchiveSettingsDto;
use crate::application::errors::ApplicationError;
use crate::application::services::rewrite_service::RewriteService;
use crate::application::services::settings_service::SettingsService;
use crate::domain::models::settings::{SETTINGS_GROUP, SETTINGS_OPTION_KEY};
use crate::domain::repositories::admin_menu_repository::AdminMenuRepository;
use crate::domain::repositories::content_type_repository::ContentTypeRepository;
use crate::domain::repositories::rewrite_repository::RewriteRepository;
use crate::domain::repositories::settings_repository::{SettingRegistration, SettingsRepository};
use crate::presentation::admin::nonce::NonceFactory;
use crate::presentation::admin::settings_page::SettingsPage;
use crate::presentation::errors::AdminError;

mod bootstrap;

/// Handles into the host the plugin runs inside.
pub struct HostBindings {
    pub rewrite_repository: Arc<dyn RewriteRepository>,
    pub settings_repository: Arc<dyn SettingsRepository>,
    pub content_type_repository: Arc<dyn ContentTypeRepository>,
    pub admin_menu_repository: Arc<dyn AdminMenuRepository>,
}

/// The plugin facade. The host constructs one instance and calls the hook
/// methods at the matching points of its lifecycle.
pub struct DateArchivesPlugin {
    pub rewrite_service: Arc<RewriteService>,
    pub settings_service: Arc<SettingsService>,
    pub settings_page: Arc<SettingsPage>,
    settings_repository: Arc<dyn SettingsRepository>,
    admin_menu_repository: Arc<dyn AdminMenuRepository>,
    nonces: Arc<NonceFactory>,
}

impl DateArchivesPlugin {
    pub fn new(bindings: HostBindings) -> Self {
        tracing::info!("Initializing date archives plugin");

        let services = bootstrap::build_services(&bindings);

        Self {
            rewrite_service: services.rewrite_service,
            settings_service: services.settings_service,
            settings_page: services.settings_page,
            settings_repository: bindings.settings_repository,
            admin_menu_repository: bindings.admin_menu_repository,
            nonces: services.nonces,
        }
    }

    /// Activation: stage rules from the stored configuration, then flush
    /// the dispatch table so they become routable immediately.
    pub async fn on_activate(&self) -> Result<(), ApplicationError> {
        tracing::info!("Activating date archives");

        self.rewrite_service.generate_rules().await?;
        self.rewrite_service.flush().await?;

        Ok(())
    }

    /// Deactivation: drop the derived rules. The stored configuration is
    /// left in place for a later reactivation.
    pub async fn on_deactivate(&self) -> Result<(), ApplicationError> {
        tracing::info!("Deactivating date archives");

        self.rewrite_service.clear().await
    }

    /// Request-cycle start: re-derive rules from the stored configuration.
    pub async fn on_request_cycle_start(&self) -> Result<(), ApplicationError> {
        self.rewrite_service.generate_rules().await
    }

    /// Admin init: register the config key, its group, and the sanitizer
    /// the host must run on every save of that key.
    pub async fn on_admin_init(&self) -> Result<(), ApplicationError> {
        tracing::debug!("Registering date archives setting");

        let registration = SettingRegistration::new(
            SETTINGS_GROUP,
            SETTINGS_OPTION_KEY,
            self.settings_service.clone(),
        );
        self.settings_repository.register_setting(registration).await?;

        Ok(())
    }

    /// Admin menu build: register the settings screen.
    pub async fn on_admin_menu_build(&self) -> Result<(), ApplicationError> {
        tracing::debug!("Registering date archives settings screen");

        self.admin_menu_repository
            .register_options_page(SettingsPage::options_page(), self.settings_page.clone())
            .await?;

        Ok(())
    }

    /// Forward a settings-form submission from the host save endpoint.
    pub async fn handle_settings_save(
        &self,
        token: &str,
        raw: Value,
    ) -> Result<ArchiveSettingsDto, AdminError> {
        self.settings_page.handle_save(token, raw).await
    }
}
