use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Config key the enabled-types value is stored under.
pub const SETTINGS_OPTION_KEY: &str = "date_archives_settings";

/// Settings group the config key belongs to.
pub const SETTINGS_GROUP: &str = "date_archives";

/// The persisted set of content types with date archives enabled.
///
/// Stored as one JSON array of identifiers. Entries keep submission order
/// and are not deduplicated; the whole value is overwritten on every save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveSettings {
    pub enabled_types: Vec<String>,
}

impl ArchiveSettings {
    pub fn new(enabled_types: Vec<String>) -> Self {
        Self { enabled_types }
    }

    /// Tolerant read of a stored config value.
    ///
    /// Absent, null, and non-array values all read as the empty set, so a
    /// corrupted or never-saved config degrades to "no archives enabled"
    /// instead of an error. Non-string entries inside an array are skipped.
    pub fn from_value(value: Option<&Value>) -> Self {
        let enabled_types = match value {
            Some(Value::Array(entries)) => entries
                .iter()
                .filter_map(|entry| entry.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        };

        Self { enabled_types }
    }

    /// Serialize to the stored representation.
    pub fn to_value(&self) -> Value {
        Value::Array(
            self.enabled_types
                .iter()
                .map(|slug| Value::String(slug.clone()))
                .collect(),
        )
    }

    pub fn is_enabled(&self, slug: &str) -> bool {
        self.enabled_types.iter().any(|enabled| enabled == slug)
    }

    pub fn is_empty(&self) -> bool {
        self.enabled_types.is_empty()
    }
}
