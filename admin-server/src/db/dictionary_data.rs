//! Dictionary data storage

use shared::models::{DictionaryData, DictionaryDataSave};
use sqlx::PgPool;

use super::page_offset;

pub async fn list(
    pool: &PgPool,
    page: u32,
    per_page: u32,
    dict_type: Option<&str>,
    label: Option<&str>,
) -> Result<(Vec<DictionaryData>, i64), sqlx::Error> {
    let items = sqlx::query_as(
        "SELECT * FROM tb_admin_dictionary_data
         WHERE status <> 1
           AND ($1::text IS NULL OR dict_type = $1)
           AND ($2::text IS NULL OR label ILIKE '%' || $2 || '%')
         ORDER BY sort ASC, id DESC
         LIMIT $3 OFFSET $4",
    )
    .bind(dict_type)
    .bind(label)
    .bind(per_page as i64)
    .bind(page_offset(page, per_page))
    .fetch_all(pool)
    .await?;

    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM tb_admin_dictionary_data
         WHERE status <> 1
           AND ($1::text IS NULL OR dict_type = $1)
           AND ($2::text IS NULL OR label ILIKE '%' || $2 || '%')",
    )
    .bind(dict_type)
    .bind(label)
    .fetch_one(pool)
    .await?;

    Ok((items, total))
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<DictionaryData>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM tb_admin_dictionary_data WHERE id = $1 AND status <> 1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn save(
    pool: &PgPool,
    payload: &DictionaryDataSave,
    operator: Option<i32>,
) -> Result<bool, sqlx::Error> {
    let result = match payload.id {
        None => {
            sqlx::query(
                "INSERT INTO tb_admin_dictionary_data
                     (dict_type, label, value, sort, remark, status, create_by, create_time)
                 VALUES ($1, $2, $3, $4, $5, 0, $6, NOW())",
            )
            .bind(&payload.dict_type)
            .bind(&payload.label)
            .bind(&payload.value)
            .bind(payload.sort)
            .bind(&payload.remark)
            .bind(operator)
            .execute(pool)
            .await?
        }
        Some(id) => {
            sqlx::query(
                "UPDATE tb_admin_dictionary_data
                 SET dict_type = $1, label = $2, value = $3, sort = $4, remark = $5,
                     update_by = $6, update_time = NOW()
                 WHERE id = $7 AND status <> 1",
            )
            .bind(&payload.dict_type)
            .bind(&payload.label)
            .bind(&payload.value)
            .bind(payload.sort)
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
        "UPDATE tb_admin_dictionary_data
         SET status = 1, update_by = $1, update_time = NOW()
         WHERE id = $2 AND status <> 1",
    )
    .bind(operator)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}
