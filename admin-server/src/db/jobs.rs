//! Scheduled job storage

use shared::models::{Job, JobSave};
use sqlx::PgPool;

use super::page_offset;

pub async fn list(
    pool: &PgPool,
    page: u32,
    per_page: u32,
    job_name: Option<&str>,
    job_group: Option<&str>,
) -> Result<(Vec<Job>, i64), sqlx::Error> {
    let items = sqlx::query_as(
        "SELECT * FROM tb_sys_job
         WHERE status <> 1
           AND ($1::text IS NULL OR job_name ILIKE '%' || $1 || '%')
           AND ($2::text IS NULL OR job_group = $2)
         ORDER BY id DESC
         LIMIT $3 OFFSET $4",
    )
    .bind(job_name)
    .bind(job_group)
    .bind(per_page as i64)
    .bind(page_offset(page, per_page))
    .fetch_all(pool)
    .await?;

    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM tb_sys_job
         WHERE status <> 1
           AND ($1::text IS NULL OR job_name ILIKE '%' || $1 || '%')
           AND ($2::text IS NULL OR job_group = $2)",
    )
    .bind(job_name)
    .bind(job_group)
    .fetch_one(pool)
    .await?;

    Ok((items, total))
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Job>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM tb_sys_job WHERE id = $1 AND status <> 1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn save(
    pool: &PgPool,
    payload: &JobSave,
    operator: Option<i32>,
) -> Result<bool, sqlx::Error> {
    let result = match payload.id {
        None => {
            sqlx::query(
                "INSERT INTO tb_sys_job
                     (job_name, job_group, cron_expression, invoke_target, remark,
                      status, create_by, create_time)
                 VALUES ($1, $2, $3, $4, $5, 0, $6, NOW())",
            )
            .bind(&payload.job_name)
            .bind(&payload.job_group)
            .bind(&payload.cron_expression)
            .bind(&payload.invoke_target)
            .bind(&payload.remark)
            .bind(operator)
            .execute(pool)
            .await?
        }
        Some(id) => {
            sqlx::query(
                "UPDATE tb_sys_job
                 SET job_name = $1, job_group = $2, cron_expression = $3, invoke_target = $4,
                     remark = $5, update_by = $6, update_time = NOW()
                 WHERE id = $7 AND status <> 1",
            )
            .bind(&payload.job_name)
            .bind(&payload.job_group)
            .bind(&payload.cron_expression)
            .bind(&payload.invoke_target)
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
        "UPDATE tb_sys_job
         SET status = 1, update_by = $1, update_time = NOW()
         WHERE id = $2 AND status <> 1",
    )
    .bind(operator)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}
