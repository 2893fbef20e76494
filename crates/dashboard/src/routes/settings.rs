//! Site settings routes.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Query, State},
    response::{Html, Redirect},
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use mt_dashboard_core::{SiteSettings, Theme};

use crate::error::AppError;
use crate::filters;
use crate::middleware::{RequireSession, RequireSettingsManager};
use crate::state::AppState;
use crate::store::SettingsRepository;

use super::{FlashParams, SiteView, ViewerView, redirect_error, redirect_success, render_or_log};

const SETTINGS_PATH: &str = "/dashboard/settings";

/// Theme choice for the radio group.
#[derive(Debug, Clone)]
pub struct ThemeOption {
    pub value: &'static str,
    pub label: &'static str,
    pub checked: bool,
}

/// Settings page template.
#[derive(Template)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
    pub viewer: ViewerView,
    pub site: SiteView,
    pub current_path: String,
    pub settings: SiteSettings,
    pub themes: Vec<ThemeOption>,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}

/// Submitted settings. An unchecked checkbox is simply absent.
#[derive(Debug, Deserialize)]
pub struct SettingsForm {
    #[serde(default)]
    pub site_title: String,
    #[serde(default)]
    pub theme: String,
    pub email_notifications: Option<String>,
}

impl SettingsForm {
    fn into_settings(self) -> Result<SiteSettings, String> {
        let site_title = self.site_title.trim();
        if site_title.is_empty() {
            return Err("Site title is required.".to_string());
        }
        let theme = self.theme.parse::<Theme>()?;

        Ok(SiteSettings {
            site_title: site_title.to_string(),
            theme,
            email_notifications: self.email_notifications.is_some(),
        })
    }
}

/// Build the settings router.
pub fn router() -> Router<AppState> {
    Router::new().route(SETTINGS_PATH, get(settings_page).post(save_settings))
}

/// GET /dashboard/settings
#[instrument(skip(session, state))]
async fn settings_page(
    RequireSession(session): RequireSession,
    State(state): State<AppState>,
    Query(flash): Query<FlashParams>,
) -> Result<Html<String>, AppError> {
    let settings = SettingsRepository::new(state.storage()).load().await?;

    let themes = Theme::ALL
        .iter()
        .map(|&theme| ThemeOption {
            value: theme.as_str(),
            label: match theme {
                Theme::Light => "Light",
                Theme::Dark => "Dark",
                Theme::System => "System",
            },
            checked: theme == settings.theme,
        })
        .collect();

    let template = SettingsTemplate {
        viewer: ViewerView::from(&session),
        site: SiteView::from(&settings),
        current_path: SETTINGS_PATH.to_string(),
        settings,
        themes,
        success_message: flash.success,
        error_message: flash.error,
    };

    Ok(Html(render_or_log(&template)))
}

/// POST /dashboard/settings
#[instrument(skip_all)]
async fn save_settings(
    RequireSettingsManager(_session): RequireSettingsManager,
    State(state): State<AppState>,
    Form(form): Form<SettingsForm>,
) -> Result<Redirect, AppError> {
    let settings = match form.into_settings() {
        Ok(settings) => settings,
        Err(message) => return Ok(redirect_error(SETTINGS_PATH, &message)),
    };

    SettingsRepository::new(state.storage())
        .save(&settings)
        .await?;

    Ok(redirect_success(SETTINGS_PATH, "Settings saved!"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_form_into_settings() {
        let settings = SettingsForm {
            site_title: " MT Admin ".to_string(),
            theme: "dark".to_string(),
            email_notifications: None,
        }
        .into_settings()
        .unwrap();

        assert_eq!(settings.site_title, "MT Admin");
        assert_eq!(settings.theme, Theme::Dark);
        assert!(!settings.email_notifications);
    }

    #[test]
    fn test_form_rejects_blank_title_and_unknown_theme() {
        let blank = SettingsForm {
            site_title: "  ".to_string(),
            theme: "light".to_string(),
            email_notifications: Some("on".to_string()),
        };
        assert!(blank.into_settings().is_err());

        let neon = SettingsForm {
            site_title: "MT".to_string(),
            theme: "neon".to_string(),
            email_notifications: None,
        };
        assert!(neon.into_settings().is_err());
    }
}
