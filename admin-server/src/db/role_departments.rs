//! Role-department link storage

use shared::models::{RoleDepartment, RoleDepartmentSave};
use sqlx::PgPool;

use super::page_offset;

pub async fn list(
    pool: &PgPool,
    page: u32,
    per_page: u32,
    role_id: Option<i32>,
    department_id: Option<i32>,
) -> Result<(Vec<RoleDepartment>, i64), sqlx::Error> {
    let items = sqlx::query_as(
        "SELECT * FROM tb_sys_role_department
         WHERE ($1::int4 IS NULL OR role_id = $1)
           AND ($2::int4 IS NULL OR department_id = $2)
         ORDER BY id DESC
         LIMIT $3 OFFSET $4",
    )
    .bind(role_id)
    .bind(department_id)
    .bind(per_page as i64)
    .bind(page_offset(page, per_page))
    .fetch_all(pool)
    .await?;

    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM tb_sys_role_department
         WHERE ($1::int4 IS NULL OR role_id = $1)
           AND ($2::int4 IS NULL OR department_id = $2)",
    )
    .bind(role_id)
    .bind(department_id)
    .fetch_one(pool)
    .await?;

    Ok((items, total))
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<RoleDepartment>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM tb_sys_role_department WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn save(pool: &PgPool, payload: &RoleDepartmentSave) -> Result<bool, sqlx::Error> {
    let result = match payload.id {
        None => {
            sqlx::query(
                "INSERT INTO tb_sys_role_department (role_id, department_id) VALUES ($1, $2)",
            )
            .bind(payload.role_id)
            .bind(payload.department_id)
            .execute(pool)
            .await?
        }
        Some(id) => {
            sqlx::query(
                "UPDATE tb_sys_role_department SET role_id = $1, department_id = $2 WHERE id = $3",
            )
            .bind(payload.role_id)
            .bind(payload.department_id)
            .bind(id)
            .execute(pool)
            .await?
        }
    };
    Ok(result.rows_affected() > 0)
}

pub async fn remove(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tb_sys_role_department WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
