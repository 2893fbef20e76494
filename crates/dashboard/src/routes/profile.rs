//! Owner profile page.
//!
//! The profile content is fixed; only the signed-in identity varies.

use askama::Template;
use axum::{Router, extract::State, response::Html, routing::get};
use tracing::instrument;

use crate::filters;
use crate::middleware::RequireSession;
use crate::state::AppState;

use super::{SiteView, ViewerView, render_or_log};

/// External profile link.
#[derive(Debug, Clone, Copy)]
pub struct SocialLink {
    pub label: &'static str,
    pub url: &'static str,
}

/// The site owner's public profile.
#[derive(Debug, Clone, Copy)]
pub struct OwnerProfile {
    pub name: &'static str,
    pub title: &'static str,
    pub avatar: &'static str,
    pub bio: &'static str,
    pub followers: &'static str,
    pub following: &'static str,
    pub posts: &'static str,
    pub skills: &'static [&'static str],
    pub email: &'static str,
    pub phone: &'static str,
    pub location: &'static str,
    pub social: &'static [SocialLink],
}

const OWNER: OwnerProfile = OwnerProfile {
    name: "MT Mony",
    title: "Full Stack Developer",
    avatar: mt_dashboard_core::keys::DEFAULT_AVATAR,
    bio: "Passionate developer with a love for creating amazing web experiences. \
          I enjoy working with modern technologies and building scalable applications. \
          In my free time, I contribute to open-source projects and explore new tech.",
    followers: "1.2k",
    following: "240",
    posts: "88",
    skills: &[
        "React",
        "Next.js",
        "TypeScript",
        "Node.js",
        "GraphQL",
        "Tailwind CSS",
        "PostgreSQL",
        "Docker",
    ],
    email: "mony@example.com",
    phone: "+1 (555) 123-4567",
    location: "San Francisco, CA",
    social: &[
        SocialLink {
            label: "GitHub",
            url: "https://github.com/mony",
        },
        SocialLink {
            label: "LinkedIn",
            url: "https://linkedin.com/in/mony",
        },
        SocialLink {
            label: "Twitter",
            url: "https://twitter.com/mony",
        },
    ],
};

#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub viewer: ViewerView,
    pub site: SiteView,
    pub current_path: String,
    pub owner: OwnerProfile,
}

/// Build the profile router.
pub fn router() -> Router<AppState> {
    Router::new().route("/dashboard/profile", get(index))
}

/// GET /dashboard/profile
#[instrument(skip(session, state))]
async fn index(
    RequireSession(session): RequireSession,
    State(state): State<AppState>,
) -> Html<String> {
    let template = ProfileTemplate {
        viewer: ViewerView::from(&session),
        site: SiteView::load(&state).await,
        current_path: "/dashboard/profile".to_string(),
        owner: OWNER,
    };
    Html(render_or_log(&template))
}
