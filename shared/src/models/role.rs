//! Role Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Role entity (RBAC 角色)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Role {
    pub id: i32,
    pub name: String,
    /// Stable role key referenced by code (e.g. `ROLE_ADMIN`)
    pub code: Option<String>,
    pub remark: Option<String>,
    /// 0 = normal, 1 = deleted
    pub status: i32,
    pub create_by: Option<i32>,
    pub create_time: DateTime<Utc>,
    pub update_by: Option<i32>,
    pub update_time: Option<DateTime<Utc>>,
}

/// Save payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoleSave {
    pub id: Option<i32>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    pub code: Option<String>,
    pub remark: Option<String>,
}
