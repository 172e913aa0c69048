//! Login and logout endpoints
//!
//! Login verifies credentials, opens a session, and optionally issues a JWT
//! and a remember-me grant. The remember-me request flag travels in the
//! login body under the configured parameter name, so the payload keeps its
//! unknown fields in a flattened map.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::error::{AppError, ErrorCode};
use shared::response::ApiResponse;
use std::collections::HashMap;

use crate::db;
use crate::error::{ServiceError, ServiceResult};
use crate::security::remember_me::{self, REMEMBER_ME_COOKIE};
use crate::security::session::SESSION_COOKIE;
use crate::security::{redirect_found, remember_me_cookie, session_cookie, wants_html};
use crate::state::AppState;
use crate::util::verify_password;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    /// Catch-all for the configurable remember-me parameter
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl LoginRequest {
    /// Whether the body requests a remember-me grant under the given
    /// parameter name
    fn wants_remember_me(&self, param: &str) -> bool {
        match self.extra.get(param) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => {
                matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "on" | "1" | "yes")
            }
            _ => false,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub user: LoginUser,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUser {
    pub id: i32,
    pub username: String,
    pub nickname: Option<String>,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, ServiceError> {
    let user = db::admin_users::find_by_username(&state.pool, &payload.username)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(&payload.password, &user.hashed_password) {
        tracing::info!(username = %payload.username, "Login failed: bad credentials");
        return Err(AppError::invalid_credentials().into());
    }

    if !user.is_active() {
        tracing::info!(username = %user.username, "Login rejected: account disabled");
        return Err(AppError::new(ErrorCode::AccountDisabled).into());
    }

    let session_id = state.sessions.register(
        user.id,
        &user.username,
        state.security.max_sessions,
        state.security.max_sessions_prevents_login,
    )?;

    let token = if state.security.jwt_enabled {
        let token = state
            .jwt
            .generate_token(user.id, &user.username)
            .map_err(|e| AppError::internal(e.to_string()))?;
        Some(token)
    } else {
        None
    };

    let mut jar = jar.add(session_cookie(session_id));
    if payload.wants_remember_me(&state.security.remember_me_param) {
        let cookie_value = remember_me::issue(&state.pool, &user.username).await?;
        jar = jar.add(remember_me_cookie(
            cookie_value,
            state.security.remember_me_validity_secs,
        ));
    }

    tracing::info!(username = %user.username, "Login succeeded");

    let data = LoginData {
        token,
        user: LoginUser {
            id: user.id,
            username: user.username,
            nickname: user.nickname,
        },
    };
    Ok((jar, Json(ApiResponse::ok(data))).into_response())
}

fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, "");
    cookie.set_path("/");
    cookie
}

pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Result<Response, ServiceError> {
    if let Some(cookie) = jar.get(SESSION_COOKIE)
        && let Some(session) = state.sessions.invalidate(cookie.value())
    {
        remember_me::clear(&state.pool, &session.username).await?;
        tracing::info!(username = %session.username, "Logged out");
    } else if let Some(cookie) = jar.get(REMEMBER_ME_COOKIE) {
        drop_remember_me_series(&state, cookie.value()).await?;
    }

    let jar = jar
        .remove(removal_cookie(SESSION_COOKIE))
        .remove(removal_cookie(REMEMBER_ME_COOKIE));

    if wants_html(&headers) {
        return Ok((jar, redirect_found(&state.security.login_page)).into_response());
    }
    Ok((jar, Json(ApiResponse::ok(true))).into_response())
}

/// No session to name the user, so revoke just the presented series
async fn drop_remember_me_series(state: &AppState, cookie_value: &str) -> ServiceResult<()> {
    if let Some((series, _)) = remember_me::decode_cookie(cookie_value) {
        db::persistent_logins::delete_by_series(&state.pool, &series).await?;
    }
    Ok(())
}
