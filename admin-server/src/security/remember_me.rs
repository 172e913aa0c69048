//! Persistent-token remember-me
//!
//! Series/token cookie scheme backed by `tb_admin_persistent_logins`. Each
//! successful cookie login rotates the token inside the same series; a
//! presented cookie whose series exists but whose token does not match is
//! treated as theft and every token for that user is revoked.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sqlx::PgPool;

use crate::db;
use crate::error::ServiceResult;
use crate::util::{now_millis, random_token};

pub const REMEMBER_ME_COOKIE: &str = "remember-me";

/// Result of presenting a remember-me cookie
#[derive(Debug)]
pub enum RememberMeOutcome {
    /// Cookie accepted; carry the rotated cookie value back to the client
    Accepted {
        username: String,
        cookie_value: String,
    },
    Rejected,
}

pub fn encode_cookie(series: &str, token: &str) -> String {
    URL_SAFE_NO_PAD.encode(format!("{series}:{token}"))
}

pub fn decode_cookie(value: &str) -> Option<(String, String)> {
    let raw = URL_SAFE_NO_PAD.decode(value).ok()?;
    let raw = String::from_utf8(raw).ok()?;
    let (series, token) = raw.split_once(':')?;
    if series.is_empty() || token.is_empty() {
        return None;
    }
    Some((series.to_string(), token.to_string()))
}

/// Open a new series for a user and return the cookie value
pub async fn issue(pool: &PgPool, username: &str) -> ServiceResult<String> {
    let series = random_token();
    let token = random_token();
    db::persistent_logins::create(pool, username, &series, &token, now_millis()).await?;
    Ok(encode_cookie(&series, &token))
}

/// Validate a presented cookie, rotating the token on success
pub async fn validate(
    pool: &PgPool,
    cookie_value: &str,
    validity_ms: i64,
) -> ServiceResult<RememberMeOutcome> {
    let Some((series, token)) = decode_cookie(cookie_value) else {
        return Ok(RememberMeOutcome::Rejected);
    };

    let Some(record) = db::persistent_logins::find_by_series(pool, &series).await? else {
        return Ok(RememberMeOutcome::Rejected);
    };

    if record.token != token {
        // series is known but the token is stale: someone else already used
        // this cookie, so revoke everything the user has
        tracing::warn!(
            username = %record.username,
            "Remember-me token mismatch, revoking all tokens for user"
        );
        db::persistent_logins::delete_for_user(pool, &record.username).await?;
        return Ok(RememberMeOutcome::Rejected);
    }

    if now_millis() - record.last_used > validity_ms {
        db::persistent_logins::delete_by_series(pool, &series).await?;
        return Ok(RememberMeOutcome::Rejected);
    }

    let new_token = random_token();
    db::persistent_logins::update_token(pool, &series, &new_token, now_millis()).await?;

    Ok(RememberMeOutcome::Accepted {
        username: record.username,
        cookie_value: encode_cookie(&series, &new_token),
    })
}

/// Drop every series belonging to a user (logout)
pub async fn clear(pool: &PgPool, username: &str) -> ServiceResult<()> {
    db::persistent_logins::delete_for_user(pool, username).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_round_trip() {
        let value = encode_cookie("series-abc", "token-xyz");
        assert_eq!(
            decode_cookie(&value),
            Some(("series-abc".to_string(), "token-xyz".to_string()))
        );
    }

    #[test]
    fn test_decode_rejects_malformed_values() {
        assert_eq!(decode_cookie("not base64 !!!"), None);
        assert_eq!(decode_cookie(&URL_SAFE_NO_PAD.encode("no-separator")), None);
        assert_eq!(decode_cookie(&URL_SAFE_NO_PAD.encode(":token")), None);
        assert_eq!(decode_cookie(&URL_SAFE_NO_PAD.encode("series:")), None);
    }

    #[test]
    fn test_cookie_value_is_cookie_safe() {
        let value = encode_cookie(&crate::util::random_token(), &crate::util::random_token());
        assert!(
            value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }
}
