//! Dictionary Data Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Dictionary entry (字典数据), grouped by `dict_type`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DictionaryData {
    pub id: i32,
    pub dict_type: String,
    pub label: String,
    pub value: Option<String>,
    /// Display order within the type
    pub sort: i32,
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
pub struct DictionaryDataSave {
    pub id: Option<i32>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub dict_type: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub label: String,
    pub value: Option<String>,
    #[serde(default)]
    pub sort: i32,
    pub remark: Option<String>,
}
