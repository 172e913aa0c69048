//! Admin User Model
//!
//! Login accounts for the console. Not exposed as a REST resource; the
//! security pipeline is its only consumer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Console login account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AdminUser {
    pub id: i32,
    pub username: String,
    /// Argon2 PHC string, never serialized to clients
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub nickname: Option<String>,
    /// 0 = normal, 1 = disabled
    pub status: i32,
    pub create_time: DateTime<Utc>,
    pub update_time: Option<DateTime<Utc>>,
}

impl AdminUser {
    /// Whether the account may authenticate
    pub fn is_active(&self) -> bool {
        self.status == 0
    }
}
