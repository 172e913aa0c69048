//! admin-server — back-office console API
//!
//! Long-running service that:
//! - Serves the generated CRUD resources of the admin and system modules
//! - Authenticates requests via session cookie, JWT bearer, or remember-me
//! - Enforces the configured security pipeline (CORS, CSRF, access guard)

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod security;
pub mod state;
pub mod util;
pub mod validation;
