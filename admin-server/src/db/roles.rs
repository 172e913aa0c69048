//! Role storage

use shared::models::{Role, RoleSave};
use sqlx::PgPool;

use super::page_offset;

pub async fn list(
    pool: &PgPool,
    page: u32,
    per_page: u32,
    name: Option<&str>,
    code: Option<&str>,
) -> Result<(Vec<Role>, i64), sqlx::Error> {
    let items = sqlx::query_as(
        "SELECT * FROM tb_admin_role
         WHERE status <> 1
           AND ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
           AND ($2::text IS NULL OR code = $2)
         ORDER BY id DESC
         LIMIT $3 OFFSET $4",
    )
    .bind(name)
    .bind(code)
    .bind(per_page as i64)
    .bind(page_offset(page, per_page))
    .fetch_all(pool)
    .await?;

    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM tb_admin_role
         WHERE status <> 1
           AND ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
           AND ($2::text IS NULL OR code = $2)",
    )
    .bind(name)
    .bind(code)
    .fetch_one(pool)
    .await?;

    Ok((items, total))
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Role>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM tb_admin_role WHERE id = $1 AND status <> 1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn save(
    pool: &PgPool,
    payload: &RoleSave,
    operator: Option<i32>,
) -> Result<bool, sqlx::Error> {
    let result = match payload.id {
        None => {
            sqlx::query(
                "INSERT INTO tb_admin_role (name, code, remark, status, create_by, create_time)
                 VALUES ($1, $2, $3, 0, $4, NOW())",
            )
            .bind(&payload.name)
            .bind(&payload.code)
            .bind(&payload.remark)
            .bind(operator)
            .execute(pool)
            .await?
        }
        Some(id) => {
            sqlx::query(
                "UPDATE tb_admin_role
                 SET name = $1, code = $2, remark = $3, update_by = $4, update_time = NOW()
                 WHERE id = $5 AND status <> 1",
            )
            .bind(&payload.name)
            .bind(&payload.code)
            .bind(&payload.remark)
            .bind(operator)
            .bind(id)
            .execute(pool)
            .await?
        }
    };
    Ok(result.rows_affected() > 0)
}

pub async fn remove(pool: &PgPool, id: i32, operator: Option<i32>) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE tb_admin_role
         SET status = 1, update_by = $1, update_time = NOW()
         WHERE id = $2 AND status <> 1",
    )
    .bind(operator)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}
