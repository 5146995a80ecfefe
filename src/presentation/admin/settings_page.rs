use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::application::dto::settings_dto::{ArchiveSettingsDto, EligibleTypeDto};
use crate::application::errors::ApplicationError;
use crate::application::services::settings_service::SettingsService;
use crate::domain::models::admin_page::OptionsPage;
use crate::domain::models::settings::{SETTINGS_GROUP, SETTINGS_OPTION_KEY};
use crate::domain::repositories::admin_menu_repository::{AdminMenuRepository, PageRenderer};
use crate::presentation::admin::markup::escape_html;
use crate::presentation::admin::nonce::NonceFactory;
use crate::presentation::errors::AdminError;

pub const SETTINGS_PAGE_SLUG: &str = "date-archives";
pub const SETTINGS_PAGE_TITLE: &str = "Date Archives";
pub const SETTINGS_PAGE_CAPABILITY: &str = "manage_options";

/// Action name the save tokens are bound to.
pub fn save_action() -> String {
    format!("{}-options", SETTINGS_GROUP)
}

/// The settings screen: renders the per-type checkbox form and handles its
/// submissions.
pub struct SettingsPage {
    settings_service: Arc<SettingsService>,
    admin_menu_repository: Arc<dyn AdminMenuRepository>,
    nonces: Arc<NonceFactory>,
}

impl SettingsPage {
    pub fn new(
        settings_service: Arc<SettingsService>,
        admin_menu_repository: Arc<dyn AdminMenuRepository>,
        nonces: Arc<NonceFactory>,
    ) -> Self {
        Self {
            settings_service,
            admin_menu_repository,
            nonces,
        }
    }

    /// Descriptor this screen is registered under.
    pub fn options_page() -> OptionsPage {
        OptionsPage::new(
            SETTINGS_PAGE_TITLE,
            SETTINGS_PAGE_TITLE,
            SETTINGS_PAGE_CAPABILITY,
            SETTINGS_PAGE_SLUG,
        )
    }

    /// Handle a form submission: reject a bad security token, then push the
    /// raw selection through the host save path.
    pub async fn handle_save(
        &self,
        token: &str,
        raw: Value,
    ) -> Result<ArchiveSettingsDto, AdminError> {
        if !self.nonces.verify(&save_action(), token) {
            tracing::warn!("Rejecting settings save with an invalid security token");
            return Err(AdminError::Unauthorized(
                "Invalid security token".to_string(),
            ));
        }

        let saved = self.settings_service.save_selection(raw).await?;

        Ok(saved)
    }

    async fn form_markup(&self) -> Result<String, AdminError> {
        let eligible = self.settings_service.list_eligible_types().await?;
        let current = self.settings_service.current_settings().await?;
        let endpoint = self
            .admin_menu_repository
            .options_endpoint()
            .await
            .map_err(ApplicationError::from)?;
        let token = self.nonces.issue(&save_action());

        let mut html = String::new();
        html.push_str("<div class=\"wrap\">\n");
        html.push_str(&format!("<h1>{}</h1>\n", escape_html(SETTINGS_PAGE_TITLE)));
        html.push_str(
            "<p>Choose the content types that should offer date-based archives.</p>\n",
        );
        html.push_str(&format!(
            "<form action=\"{}\" method=\"post\">\n",
            escape_html(&endpoint)
        ));
        html.push_str(&format!(
            "<input type=\"hidden\" name=\"option_group\" value=\"{}\" />\n",
            escape_html(SETTINGS_GROUP)
        ));
        html.push_str(&format!(
            "<input type=\"hidden\" name=\"option_key\" value=\"{}\" />\n",
            escape_html(SETTINGS_OPTION_KEY)
        ));
        html.push_str(&format!(
            "<input type=\"hidden\" name=\"_token\" value=\"{}\" />\n",
            escape_html(&token)
        ));

        if eligible.is_empty() {
            html.push_str("<p>No public content types found.</p>\n");
        } else {
            html.push_str("<fieldset>\n");
            for entry in &eligible {
                let checked = current
                    .enabled_types
                    .iter()
                    .any(|enabled| enabled == &entry.identifier);
                html.push_str(&checkbox_row(entry, checked));
            }
            html.push_str("</fieldset>\n");
        }

        html.push_str(
            "<p class=\"submit\"><button type=\"submit\" class=\"button button-primary\">Save Changes</button></p>\n",
        );
        html.push_str("</form>\n</div>\n");

        Ok(html)
    }
}

#[async_trait]
impl PageRenderer for SettingsPage {
    async fn render(&self) -> String {
        match self.form_markup().await {
            Ok(html) => html,
            Err(error) => {
                tracing::error!("Failed to render settings page: {}", error);
                "<div class=\"wrap\"><p>Settings are temporarily unavailable.</p></div>\n"
                    .to_string()
            }
        }
    }
}

fn checkbox_row(entry: &EligibleTypeDto, checked: bool) -> String {
    let slug = escape_html(&entry.identifier);
    let label = escape_html(&entry.display_label);
    let checked_attr = if checked { " checked" } else { "" };

    format!(
        "<label for=\"{slug}\"><input type=\"checkbox\" name=\"{key}[]\" id=\"{slug}\" value=\"{slug}\"{checked_attr} /> {label} (<code>{slug}</code>)</label><br>\n",
        key = SETTINGS_OPTION_KEY,
    )
}
