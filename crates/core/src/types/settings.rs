//! Site-wide settings edited from the settings page.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Colour theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    /// All themes, in the order the settings page offers them.
    pub const ALL: [Self; 3] = [Self::Light, Self::Dark, Self::System];

    /// Returns the stored label of this theme.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            _ => Err(format!("invalid theme: {s}")),
        }
    }
}

/// Settings stored under the `settings` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSettings {
    pub site_title: String,
    pub theme: Theme,
    pub email_notifications: bool,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_title: "My Awesome Site".to_owned(),
            theme: Theme::System,
            email_notifications: true,
        }
    }
}
