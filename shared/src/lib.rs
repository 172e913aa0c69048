//! Shared types for the admin back-office
//!
//! Common types used by the server crate and any future console tooling:
//! the response envelope, error codes, and entity models.

pub mod error;
pub mod models;
pub mod response;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
