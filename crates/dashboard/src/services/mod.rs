//! Business logic on top of the store repositories.

pub mod auth;

pub use auth::AuthService;
