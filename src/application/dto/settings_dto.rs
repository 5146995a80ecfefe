use serde::{Deserialize, Serialize};

use crate::domain::models::content_type::ContentType;
use crate::domain::models::settings::ArchiveSettings;

/// A content type offered on the settings screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibleTypeDto {
    pub identifier: String,
    pub display_label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveSettingsDto {
    pub enabled_types: Vec<String>,
}

impl From<ContentType> for EligibleTypeDto {
    fn from(content_type: ContentType) -> Self {
        Self {
            identifier: content_type.slug,
            display_label: content_type.label,
        }
    }
}

impl From<ArchiveSettings> for ArchiveSettingsDto {
    fn from(settings: ArchiveSettings) -> Self {
        Self {
            enabled_types: settings.enabled_types,
        }
    }
}

impl From<ArchiveSettingsDto> for ArchiveSettings {
    fn from(dto: ArchiveSettingsDto) -> Self {
        Self {
            enabled_types: dto.enabled_types,
        }
    }
}
