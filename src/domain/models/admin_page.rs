use serde::{Deserialize, Serialize};

/// Descriptor for a screen registered under the host's settings menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionsPage {
    /// Title shown in the page heading.
    pub page_title: String,
    /// Title shown in the settings menu.
    pub menu_title: String,
    /// Capability a user needs to open the page.
    pub capability: String,
    /// Slug the host keys the page under.
    pub slug: String,
}

impl OptionsPage {
    pub fn new(page_title: &str, menu_title: &str, capability: &str, slug: &str) -> Self {
        Self {
            page_title: page_title.to_string(),
            menu_title: menu_title.to_string(),
            capability: capability.to_string(),
            slug: slug.to_string(),
        }
    }
}
