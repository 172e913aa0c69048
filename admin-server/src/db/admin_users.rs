//! Console account storage

use shared::models::AdminUser;
use sqlx::PgPool;

use crate::util::hash_password;

pub async fn find_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<AdminUser>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM tb_admin_user WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await
}

/// Seed the default administrator account when the table is empty.
///
/// The password comes from ADMIN_INITIAL_PASSWORD; the dev default is only
/// acceptable because the account should be rotated on first login.
pub async fn ensure_seed(pool: &PgPool) -> Result<(), sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tb_admin_user")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Ok(());
    }

    let password =
        std::env::var("ADMIN_INITIAL_PASSWORD").unwrap_or_else(|_| "admin123".to_string());
    let hashed = hash_password(&password).map_err(|e| sqlx::Error::Protocol(e.to_string()))?;

    sqlx::query(
        "INSERT INTO tb_admin_user (username, hashed_password, nickname, status, create_time)
         VALUES ('admin', $1, 'Administrator', 0, NOW())",
    )
    .bind(&hashed)
    .execute(pool)
    .await?;

    tracing::warn!("Seeded default admin account; change its password");
    Ok(())
}
