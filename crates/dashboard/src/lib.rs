//! MT Dashboard library.
//!
//! This crate provides the dashboard as a library so the binary, the CLI and
//! the integration tests share one implementation.
//!
//! # Layers
//!
//! - [`storage`] - the key/value capability standing in for browser local
//!   storage (`SQLite`, in-memory, and per-visitor session backends)
//! - [`store`] - typed repositories for the directory, the signed-in user and
//!   site settings, each doing whole-value read-modify-write
//! - [`services`] - credential checking and login
//! - [`routes`] / [`middleware`] - the axum surface

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;
pub mod store;
