//! MT Dashboard Core - Shared types library.
//!
//! This crate provides common types used across all MT dashboard components:
//! - `dashboard` - The server-rendered admin dashboard
//! - `cli` - Command-line tools for migrations and directory management
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Directory records, roles, sessions, settings and type-safe IDs
//! - [`keys`] - Storage keys and the built-in super admin credential

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod keys;
pub mod types;

pub use types::*;
