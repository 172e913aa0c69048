//! Notice Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Notice entity (通知公告)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Notice {
    pub id: i32,
    /// 0 = notice, 1 = announcement
    pub notice_type: i32,
    pub title: String,
    pub content: Option<String>,
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
pub struct NoticeSave {
    pub id: Option<i32>,
    #[serde(default)]
    pub notice_type: i32,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
    pub content: Option<String>,
    pub remark: Option<String>,
}
