use std::sync::Arc;

use crate::app::HostBindings;
use crate::application::services::rewrite_service::RewriteService;
use crate::application::services::settings_service::SettingsService;
use crate::presentation::admin::nonce::NonceFactory;
use crate::presentation::admin::settings_page::SettingsPage;

/// Services the facade hands out, built once at plugin construction.
pub(super) struct PluginServices {
    pub rewrite_service: Arc<RewriteService>,
    pub settings_service: Arc<SettingsService>,
    pub settings_page: Arc<SettingsPage>,
    pub nonces: Arc<NonceFactory>,
}

pub(super) fn build_services(bindings: &HostBindings) -> PluginServices {
    let rewrite_service = Arc::new(RewriteService::new(
        bindings.rewrite_repository.clone(),
        bindings.settings_repository.clone(),
    ));

    let settings_service = Arc::new(SettingsService::new(
        bindings.settings_repository.clone(),
        bindings.content_type_repository.clone(),
        bindings.rewrite_repository.clone(),
    ));

    let nonces = Arc::new(NonceFactory::new());

    let settings_page = Arc::new(SettingsPage::new(
        settings_service.clone(),
        bindings.admin_menu_repository.clone(),
        nonces.clone(),
    ));

    PluginServices {
        rewrite_service,
        settings_service,
        settings_page,
        nonces,
    }
}
