//! Core types for the MT dashboard.
//!
//! This module provides type-safe wrappers for the directory and session model.

pub mod email;
pub mod id;
pub mod role;
pub mod session;
pub mod settings;
pub mod status;
pub mod user;

pub use email::{Email, EmailError};
pub use id::*;
pub use role::{Permission, Role, RoleParseError};
pub use session::SessionRecord;
pub use settings::{SiteSettings, Theme};
pub use status::Status;
pub use user::{NewUser, UserPatch, UserRecord};
