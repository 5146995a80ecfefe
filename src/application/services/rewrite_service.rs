use std::sync::Arc;

use crate::application::errors::ApplicationError;
use crate::domain::models::rewrite::date_archive_rules;
use crate::domain::models::settings::{ArchiveSettings, SETTINGS_OPTION_KEY};
use crate::domain::repositories::rewrite_repository::RewriteRepository;
use crate::domain::repositories::settings_repository::SettingsRepository;

/// Derives date-archive rules from the stored configuration and manages
/// their lifecycle in the host dispatch table.
pub struct RewriteService {
    rewrite_repository: Arc<dyn RewriteRepository>,
    settings_repository: Arc<dyn SettingsRepository>,
}

impl RewriteService {
    pub fn new(
        rewrite_repository: Arc<dyn RewriteRepository>,
        settings_repository: Arc<dyn SettingsRepository>,
    ) -> Self {
        Self {
            rewrite_repository,
            settings_repository,
        }
    }

    /// Stage the date-archive rules for every enabled content type, reading
    /// a fresh configuration snapshot first.
    ///
    /// A missing, empty, or malformed configuration stages nothing and
    /// succeeds. Duplicate identifiers stage their rules again; the host
    /// table keys staged rules by pattern, so re-registration is harmless.
    pub async fn generate_rules(&self) -> Result<(), ApplicationError> {
        tracing::debug!("Generating date archive rules");

        let stored = self
            .settings_repository
            .get_option(SETTINGS_OPTION_KEY)
            .await?;
        let settings = ArchiveSettings::from_value(stored.as_ref());

        if settings.is_empty() {
            tracing::debug!("No content types enabled, nothing to register");
            return Ok(());
        }

        let mut staged = 0;
        for slug in &settings.enabled_types {
            for rule in date_archive_rules(slug) {
                self.rewrite_repository.register_rule(rule).await?;
                staged += 1;
            }
        }

        tracing::info!(
            "Staged {} date archive rules for {} content types",
            staged,
            settings.enabled_types.len()
        );

        Ok(())
    }

    /// Invalidate the active dispatch table so it is regenerated from the
    /// staged rules on next resolution.
    pub async fn flush(&self) -> Result<(), ApplicationError> {
        tracing::info!("Flushing dispatch table");

        self.rewrite_repository.rebuild().await?;

        Ok(())
    }

    /// Drop every staged and active rule. Stored configuration is left
    /// untouched.
    pub async fn clear(&self) -> Result<(), ApplicationError> {
        tracing::info!("Clearing dispatch table");

        self.rewrite_repository.clear().await?;

        Ok(())
    }
}
