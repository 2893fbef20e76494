//! Services placeholder page.

use askama::Template;
use axum::{Router, extract::State, response::Html, routing::get};

use crate::filters;
use crate::middleware::RequireSession;
use crate::state::AppState;

use super::{SiteView, ViewerView, render_or_log};

#[derive(Template)]
#[template(path = "services.html")]
pub struct ServicesTemplate {
    pub viewer: ViewerView,
    pub site: SiteView,
    pub current_path: String,
}

/// Build the services router.
pub fn router() -> Router<AppState> {
    Router::new().route("/dashboard/services", get(index))
}

/// GET /dashboard/services
async fn index(
    RequireSession(session): RequireSession,
    State(state): State<AppState>,
) -> Html<String> {
    let template = ServicesTemplate {
        viewer: ViewerView::from(&session),
        site: SiteView::load(&state).await,
        current_path: "/dashboard/services".to_string(),
    };
    Html(render_or_log(&template))
}
