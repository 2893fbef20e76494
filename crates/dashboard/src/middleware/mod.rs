//! Session layer and authentication extractors.

pub mod auth;
pub mod session;

pub use auth::{
    OptionalSession, RequireEditor, RequireSession, RequireSettingsManager, RequireSuperAdmin,
};
pub use session::{SESSION_COOKIE_NAME, create_session_layer, create_session_store};
