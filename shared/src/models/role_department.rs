//! Role-Department link Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Role ↔ department assignment (data-scope binding)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RoleDepartment {
    pub id: i32,
    pub role_id: i32,
    pub department_id: i32,
}

/// Save payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoleDepartmentSave {
    pub id: Option<i32>,
    #[validate(range(min = 1, message = "must be a positive id"))]
    pub role_id: i32,
    #[validate(range(min = 1, message = "must be a positive id"))]
    pub department_id: i32,
}
