use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::domain::errors::DomainError;
use crate::domain::repositories::settings_repository::{
    SettingRegistration, SettingsRepository, SettingsSanitizer,
};

/// In-memory host configuration store: an option map plus the sanitizers
/// registered against individual keys.
pub struct MemorySettingsRepository {
    options: Mutex<HashMap<String, Value>>,
    registrations: Mutex<HashMap<String, SettingRegistration>>,
}

impl MemorySettingsRepository {
    pub fn new() -> Self {
        Self {
            options: Mutex::new(HashMap::new()),
            registrations: Mutex::new(HashMap::new()),
        }
    }

    /// Group the given key was registered under, if any.
    pub async fn registered_group(&self, key: &str) -> Option<String> {
        self.registrations
            .lock()
            .await
            .get(key)
            .map(|registration| registration.group.clone())
    }
}

impl Default for MemorySettingsRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SettingsRepository for MemorySettingsRepository {
    async fn get_option(&self, key: &str) -> Result<Option<Value>, DomainError> {
        Ok(self.options.lock().await.get(key).cloned())
    }

    async fn set_option(&self, key: &str, value: Value) -> Result<(), DomainError> {
        self.options.lock().await.insert(key.to_string(), value);

        Ok(())
    }

    async fn register_setting(
        &self,
        registration: SettingRegistration,
    ) -> Result<(), DomainError> {
        tracing::debug!(
            "Registering setting '{}' in group '{}'",
            registration.key,
            registration.group
        );
        self.registrations
            .lock()
            .await
            .insert(registration.key.clone(), registration);

        Ok(())
    }

    async fn submit(&self, key: &str, raw: Value) -> Result<Value, DomainError> {
        let registration = self.registrations.lock().await.get(key).cloned();

        let value = match registration {
            Some(registration) => registration.sanitizer.sanitize(raw).await,
            None => raw,
        };

        self.set_option(key, value.clone()).await?;

        Ok(value)
    }
}
