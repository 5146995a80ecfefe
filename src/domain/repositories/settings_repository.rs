use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::errors::DomainError;

/// Filters and normalizes a raw submitted value before persistence.
///
/// Sanitizers never fail: invalid entries are dropped and whatever survives
/// is returned.
#[async_trait]
pub trait SettingsSanitizer: Send + Sync {
    async fn sanitize(&self, raw: Value) -> Value;
}

/// A config key registered with the host store, paired with the sanitizer
/// the host runs on every save of that key.
#[derive(Clone)]
pub struct SettingRegistration {
    pub group: String,
    pub key: String,
    pub sanitizer: Arc<dyn SettingsSanitizer>,
}

impl SettingRegistration {
    pub fn new(group: &str, key: &str, sanitizer: Arc<dyn SettingsSanitizer>) -> Self {
        Self {
            group: group.to_string(),
            key: key.to_string(),
            sanitizer,
        }
    }
}

/// Host configuration store.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Read one stored value. `Ok(None)` when the key was never saved.
    async fn get_option(&self, key: &str) -> Result<Option<Value>, DomainError>;

    /// Overwrite one stored value wholesale.
    async fn set_option(&self, key: &str, value: Value) -> Result<(), DomainError>;

    /// Register a key and the sanitizer run on its saves.
    async fn register_setting(&self, registration: SettingRegistration)
        -> Result<(), DomainError>;

    /// Save-endpoint path: run the sanitizer registered for `key` on `raw`
    /// (an unregistered key persists `raw` untouched), store the result,
    /// and return it.
    async fn submit(&self, key: &str, raw: Value) -> Result<Value, DomainError>;
}
