//! Notice storage

use shared::models::{Notice, NoticeSave};
use sqlx::PgPool;

use super::page_offset;

pub async fn list(
    pool: &PgPool,
    page: u32,
    per_page: u32,
    notice_type: Option<i32>,
    title: Option<&str>,
) -> Result<(Vec<Notice>, i64), sqlx::Error> {
    let items = sqlx::query_as(
        "SELECT * FROM tb_admin_notice
         WHERE status <> 1
           AND ($1::int4 IS NULL OR notice_type = $1)
           AND ($2::text IS NULL OR title ILIKE '%' || $2 || '%')
         ORDER BY id DESC
         LIMIT $3 OFFSET $4",
    )
    .bind(notice_type)
    .bind(title)
    .bind(per_page as i64)
    .bind(page_offset(page, per_page))
    .fetch_all(pool)
    .await?;

    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM tb_admin_notice
         WHERE status <> 1
           AND ($1::int4 IS NULL OR notice_type = $1)
           AND ($2::text IS NULL OR title ILIKE '%' || $2 || '%')",
    )
    .bind(notice_type)
    .bind(title)
    .fetch_one(pool)
    .await?;

    Ok((items, total))
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Notice>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM tb_admin_notice WHERE id = $1 AND status <> 1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Insert when the payload has no id, update otherwise. Returns whether a
/// row was written.
pub async fn save(
    pool: &PgPool,
    payload: &NoticeSave,
    operator: Option<i32>,
) -> Result<bool, sqlx::Error> {
    let result = match payload.id {
        None => {
            sqlx::query(
                "INSERT INTO tb_admin_notice
                     (notice_type, title, content, remark, status, create_by, create_time)
                 VALUES ($1, $2, $3, $4, 0, $5, NOW())",
            )
            .bind(payload.notice_type)
            .bind(&payload.title)
            .bind(&payload.content)
            .bind(&payload.remark)
            .bind(operator)
            .execute(pool)
            .await?
        }
        Some(id) => {
            sqlx::query(
                "UPDATE tb_admin_notice
                 SET notice_type = $1, title = $2, content = $3, remark = $4,
                     update_by = $5, update_time = NOW()
                 WHERE id = $6 AND status <> 1",
            )
            .bind(payload.notice_type)
            .bind(&payload.title)
            .bind(&payload.content)
            .bind(&payload.remark)
            .bind(operator)
            .bind(id)
            .execute(pool)
            .await?
        }
    };
    Ok(result.rows_affected() > 0)
}

/// Soft delete. Returns whether a live row was marked.
pub async fn remove(pool: &PgPool, id: i32, operator: Option<i32>) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE tb_admin_notice
         SET status = 1, update_by = $1, update_time = NOW()
         WHERE id = $2 AND status <> 1",
    )
    .bind(operator)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}
