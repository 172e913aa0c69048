//! Persistent login (remember-me token) storage
//!
//! Serves both the remember-me validation path and the raw CRUD resource
//! the console exposes over the same table.

use shared::models::{PersistentLogin, PersistentLoginSave};
use sqlx::PgPool;

use super::page_offset;

pub async fn list(
    pool: &PgPool,
    page: u32,
    per_page: u32,
    username: Option<&str>,
) -> Result<(Vec<PersistentLogin>, i64), sqlx::Error> {
    let items = sqlx::query_as(
        "SELECT * FROM tb_admin_persistent_logins
         WHERE ($1::text IS NULL OR username = $1)
         ORDER BY id DESC
         LIMIT $2 OFFSET $3",
    )
    .bind(username)
    .bind(per_page as i64)
    .bind(page_offset(page, per_page))
    .fetch_all(pool)
    .await?;

    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM tb_admin_persistent_logins
         WHERE ($1::text IS NULL OR username = $1)",
    )
    .bind(username)
    .fetch_one(pool)
    .await?;

    Ok((items, total))
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<PersistentLogin>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM tb_admin_persistent_logins WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_series(
    pool: &PgPool,
    series: &str,
) -> Result<Option<PersistentLogin>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM tb_admin_persistent_logins WHERE series = $1")
        .bind(series)
        .fetch_optional(pool)
        .await
}

/// Open a new token series
pub async fn create(
    pool: &PgPool,
    username: &str,
    series: &str,
    token: &str,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO tb_admin_persistent_logins (username, series, token, last_used)
         VALUES ($1, $2, $3, $4)",
    )
    .bind(username)
    .bind(series)
    .bind(token)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

/// Rotate the token inside an existing series
pub async fn update_token(
    pool: &PgPool,
    series: &str,
    token: &str,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE tb_admin_persistent_logins SET token = $1, last_used = $2 WHERE series = $3",
    )
    .bind(token)
    .bind(now)
    .bind(series)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn delete_by_series(pool: &PgPool, series: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM tb_admin_persistent_logins WHERE series = $1")
        .bind(series)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn delete_for_user(pool: &PgPool, username: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM tb_admin_persistent_logins WHERE username = $1")
        .bind(username)
        .execute(pool)
        .await?;
    Ok(())
}

/// Raw upsert used by the CRUD resource
pub async fn save(pool: &PgPool, payload: &PersistentLoginSave) -> Result<bool, sqlx::Error> {
    let result = match payload.id {
        None => {
            sqlx::query(
                "INSERT INTO tb_admin_persistent_logins (username, series, token, last_used)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(&payload.username)
            .bind(&payload.series)
            .bind(&payload.token)
            .bind(payload.last_used)
            .execute(pool)
            .await?
        }
        Some(id) => {
            sqlx::query(
                "UPDATE tb_admin_persistent_logins
                 SET username = $1, series = $2, token = $3, last_used = $4
                 WHERE id = $5",
            )
            .bind(&payload.username)
            .bind(&payload.series)
            .bind(&payload.token)
            .bind(payload.last_used)
            .bind(id)
            .execute(pool)
            .await?
        }
    };
    Ok(result.rows_affected() > 0)
}

pub async fn remove(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tb_admin_persistent_logins WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
