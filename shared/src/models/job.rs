//! Scheduled Job Model
//!
//! Job definition rows only; nothing in this service executes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Scheduled job definition (定时任务)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Job {
    pub id: i32,
    pub job_name: String,
    pub job_group: Option<String>,
    pub cron_expression: Option<String>,
    /// Target to invoke when the job fires (owned by the external scheduler)
    pub invoke_target: Option<String>,
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
pub struct JobSave {
    pub id: Option<i32>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub job_name: String,
    pub job_group: Option<String>,
    pub cron_expression: Option<String>,
    pub invoke_target: Option<String>,
    pub remark: Option<String>,
}
