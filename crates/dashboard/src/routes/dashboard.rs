//! Dashboard overview and the view types shared by every dashboard page.

use askama::Template;
use axum::{Router, extract::State, response::Html, routing::get};
use tracing::instrument;

use mt_dashboard_core::{Permission, SessionRecord, SiteSettings};

use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireSession;
use crate::state::AppState;
use crate::store::{DirectoryRepository, DirectoryStats, SettingsRepository};

use super::render_or_log;

// =============================================================================
// Shared views
// =============================================================================

/// The signed-in user as templates see it.
#[derive(Debug, Clone)]
pub struct ViewerView {
    pub email: String,
    pub role: String,
    pub can_edit: bool,
    pub can_change_role: bool,
    pub can_delete: bool,
    pub can_manage_settings: bool,
}

impl From<&SessionRecord> for ViewerView {
    fn from(session: &SessionRecord) -> Self {
        Self {
            email: session.email.clone(),
            role: session.role.to_string(),
            can_edit: session.role.allows(Permission::EditUser),
            can_change_role: session.role.allows(Permission::ChangeRole),
            can_delete: session.role.allows(Permission::DeleteUser),
            can_manage_settings: session.role.allows(Permission::ManageSettings),
        }
    }
}

/// Site-wide settings applied to the page chrome.
#[derive(Debug, Clone)]
pub struct SiteView {
    pub title: String,
    pub theme: String,
}

impl From<&SiteSettings> for SiteView {
    fn from(settings: &SiteSettings) -> Self {
        Self {
            title: settings.site_title.clone(),
            theme: settings.theme.to_string(),
        }
    }
}

impl SiteView {
    /// Load the chrome settings, falling back to defaults if unreadable.
    pub async fn load(state: &AppState) -> Self {
        let settings = SettingsRepository::new(state.storage())
            .load()
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to load site settings, using defaults");
                SiteSettings::default()
            });
        Self::from(&settings)
    }
}

// =============================================================================
// Overview
// =============================================================================

/// One row of the monthly activity table.
#[derive(Debug, Clone, Copy)]
pub struct MonthlyActivity {
    pub month: &'static str,
    pub this_year: u32,
    pub last_year: u32,
}

impl MonthlyActivity {
    const fn new(month: &'static str, this_year: u32, last_year: u32) -> Self {
        Self {
            month,
            this_year,
            last_year,
        }
    }
}

const MONTHLY_ACTIVITY: [MonthlyActivity; 7] = [
    MonthlyActivity::new("Jan", 4000, 2400),
    MonthlyActivity::new("Feb", 3000, 1398),
    MonthlyActivity::new("Mar", 5000, 9800),
    MonthlyActivity::new("Apr", 4780, 3908),
    MonthlyActivity::new("May", 5890, 4800),
    MonthlyActivity::new("Jun", 4390, 3800),
    MonthlyActivity::new("Jul", 5490, 4300),
];

/// Summary card on the overview.
#[derive(Debug, Clone)]
pub struct SummaryCard {
    pub label: &'static str,
    pub value: String,
    pub tone: &'static str,
}

fn summary_cards(stats: DirectoryStats) -> Vec<SummaryCard> {
    vec![
        SummaryCard {
            label: "Total Users",
            value: stats.total.to_string(),
            tone: "blue",
        },
        SummaryCard {
            label: "Active Users",
            value: stats.active.to_string(),
            tone: "green",
        },
        SummaryCard {
            label: "Admins",
            value: stats.admins.to_string(),
            tone: "yellow",
        },
        SummaryCard {
            label: "Reports",
            value: "27".to_string(),
            tone: "red",
        },
    ]
}

/// Dashboard overview template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub viewer: ViewerView,
    pub site: SiteView,
    pub current_path: String,
    pub cards: Vec<SummaryCard>,
    pub activity: Vec<MonthlyActivity>,
}

/// Build the overview router.
pub fn router() -> Router<AppState> {
    Router::new().route("/dashboard", get(index))
}

/// Dashboard overview page handler.
#[instrument(skip(session, state))]
pub async fn index(
    RequireSession(session): RequireSession,
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    let stats = DirectoryRepository::new(state.storage()).stats().await?;

    let template = DashboardTemplate {
        viewer: ViewerView::from(&session),
        site: SiteView::load(&state).await,
        current_path: "/dashboard".to_string(),
        cards: summary_cards(stats),
        activity: MONTHLY_ACTIVITY.to_vec(),
    };

    Ok(Html(render_or_log(&template)))
}
