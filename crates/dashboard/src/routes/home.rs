//! Landing page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Router, routing::get};

use crate::filters;
use crate::middleware::OptionalSession;
use crate::state::AppState;

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub signed_in_as: Option<String>,
}

/// Build the landing router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(home))
}

/// GET /
async fn home(OptionalSession(session): OptionalSession) -> HomeTemplate {
    HomeTemplate {
        signed_in_as: session.map(|s| s.email),
    }
}
