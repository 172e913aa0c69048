//! Persistent Login Model
//!
//! Remember-me token rows. The same table backs the remember-me cookie
//! validation and the raw CRUD resource the console exposes.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Persistent login token row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PersistentLogin {
    pub id: i32,
    pub username: String,
    /// Opaque series identifier, fixed for the lifetime of the grant
    pub series: String,
    /// Rotating token value, replaced on every successful use
    pub token: String,
    /// Epoch millis of the last successful use
    pub last_used: i64,
}

/// Save payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PersistentLoginSave {
    pub id: Option<i32>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub username: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub series: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub token: String,
    #[serde(default)]
    pub last_used: i64,
}
