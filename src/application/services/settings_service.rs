use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::application::dto::settings_dto::{ArchiveSettingsDto, EligibleTypeDto};
use crate::application::errors::ApplicationError;
use crate::domain::models::content_type::sanitize_type_key;
use crate::domain::models::settings::{ArchiveSettings, SETTINGS_OPTION_KEY};
use crate::domain::repositories::content_type_repository::ContentTypeRepository;
use crate::domain::repositories::rewrite_repository::RewriteRepository;
use crate::domain::repositories::settings_repository::{SettingsRepository, SettingsSanitizer};

/// Manages the enabled-types selection: reads it, offers candidates for the
/// settings screen, and sanitizes submissions on the host save path.
pub struct SettingsService {
    settings_repository: Arc<dyn SettingsRepository>,
    content_type_repository: Arc<dyn ContentTypeRepository>,
    rewrite_repository: Arc<dyn RewriteRepository>,
}

impl SettingsService {
    pub fn new(
        settings_repository: Arc<dyn SettingsRepository>,
        content_type_repository: Arc<dyn ContentTypeRepository>,
        rewrite_repository: Arc<dyn RewriteRepository>,
    ) -> Self {
        Self {
            settings_repository,
            content_type_repository,
            rewrite_repository,
        }
    }

    /// Content types offered on the settings screen: public and not
    /// built-in, in registration order.
    pub async fn list_eligible_types(&self) -> Result<Vec<EligibleTypeDto>, ApplicationError> {
        tracing::debug!("Listing content types eligible for date archives");

        let types = self.content_type_repository.list_public_types(false).await?;

        Ok(types.into_iter().map(EligibleTypeDto::from).collect())
    }

    /// Current stored selection. Never-saved and malformed values both read
    /// as empty.
    pub async fn current_settings(&self) -> Result<ArchiveSettingsDto, ApplicationError> {
        tracing::debug!("Reading stored date archive selection");

        let stored = self
            .settings_repository
            .get_option(SETTINGS_OPTION_KEY)
            .await?;
        let settings = ArchiveSettings::from_value(stored.as_ref());

        Ok(ArchiveSettingsDto::from(settings))
    }

    /// Push a submitted selection through the host save path. The host runs
    /// whatever sanitizer is registered for the key before persisting.
    pub async fn save_selection(&self, raw: Value) -> Result<ArchiveSettingsDto, ApplicationError> {
        tracing::info!("Saving date archive selection");

        let stored = self
            .settings_repository
            .submit(SETTINGS_OPTION_KEY, raw)
            .await?;
        let settings = ArchiveSettings::from_value(Some(&stored));

        Ok(ArchiveSettingsDto::from(settings))
    }

    /// Filter a submitted selection down to identifiers present in the full
    /// public registry (built-in types included), normalize the survivors to
    /// key-safe form, and flush the dispatch table.
    ///
    /// Membership is checked on the raw submitted value; normalization only
    /// applies to survivors. Order is kept and duplicates are not removed.
    /// The flush happens even when the surviving selection is unchanged or
    /// empty. Never fails: registry and flush errors are logged and the
    /// selection degrades toward empty.
    async fn sanitize_selection(&self, raw: &Value) -> Value {
        let registered = match self.content_type_repository.list_public_types(true).await {
            Ok(types) => types,
            Err(error) => {
                tracing::warn!("Registry lookup failed during sanitize: {}", error);
                Vec::new()
            }
        };

        let surviving: Vec<Value> = match raw {
            Value::Array(entries) => entries
                .iter()
                .filter_map(Value::as_str)
                .filter(|slug| registered.iter().any(|candidate| candidate.slug == *slug))
                .map(|slug| Value::String(sanitize_type_key(slug)))
                .collect(),
            _ => Vec::new(),
        };

        if let Err(error) = self.rewrite_repository.rebuild().await {
            tracing::warn!("Dispatch table flush failed during sanitize: {}", error);
        }

        Value::Array(surviving)
    }
}

#[async_trait]
impl SettingsSanitizer for SettingsService {
    async fn sanitize(&self, raw: Value) -> Value {
        tracing::debug!("Sanitizing submitted date archive selection");

        self.sanitize_selection(&raw).await
    }
}
