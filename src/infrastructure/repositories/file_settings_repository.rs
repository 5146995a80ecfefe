use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::Mutex;

use crate::domain::errors::DomainError;
use crate::domain::repositories::settings_repository::{
    SettingRegistration, SettingsRepository, SettingsSanitizer,
};
use crate::infrastructure::persistence::file_system::{read_json_file, write_json_file};

/// File-backed host configuration store. Every option lives in one JSON map
/// on disk, and every operation loads a fresh snapshot of that file; nothing
/// is cached between operations.
pub struct FileSettingsRepository {
    options_file: PathBuf,
    registrations: Mutex<HashMap<String, SettingRegistration>>,
    // Serializes read-modify-write cycles on the options file.
    write_lock: Mutex<()>,
}

impl FileSettingsRepository {
    pub fn new(options_file: PathBuf) -> Self {
        Self {
            options_file,
            registrations: Mutex::new(HashMap::new()),
            write_lock: Mutex::new(()),
        }
    }

    /// Load the current options map. A file that doesn't exist yet reads as
    /// an empty map.
    async fn load_options(&self) -> Result<HashMap<String, Value>, DomainError> {
        match read_json_file(&self.options_file).await {
            Ok(options) => Ok(options),
            Err(DomainError::NotFound(_)) => Ok(HashMap::new()),
            Err(error) => Err(error),
        }
    }
}

#[async_trait]
impl SettingsRepository for FileSettingsRepository {
    async fn get_option(&self, key: &str) -> Result<Option<Value>, DomainError> {
        let options = self.load_options().await?;

        Ok(options.get(key).cloned())
    }

    async fn set_option(&self, key: &str, value: Value) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut options = self.load_options().await?;
        options.insert(key.to_string(), value);
        write_json_file(&self.options_file, &options).await?;

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
