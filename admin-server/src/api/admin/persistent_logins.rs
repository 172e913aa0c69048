//! Persistent login token endpoints
//!
//! Raw CRUD over the remember-me token table. Mainly useful for inspecting
//! and revoking outstanding grants.

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use shared::error::AppError;
use shared::models::{PersistentLogin, PersistentLoginSave};
use shared::response::{ApiResponse, PaginatedResponse};

use crate::api::{ApiResult, default_page_num, default_page_size};
use crate::db;
use crate::state::AppState;
use crate::validation::validate;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/list", get(list))
        .route("/save", post(save))
        .route("/delete/{id}", post(remove))
        .route("/{id}", get(detail).delete(remove))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistentLoginQuery {
    #[serde(default = "default_page_num")]
    pub page_num: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    pub username: Option<String>,
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<PersistentLoginQuery>,
) -> ApiResult<PaginatedResponse<PersistentLogin>> {
    let (items, total) = db::persistent_logins::list(
        &state.pool,
        query.page_num,
        query.page_size,
        query.username.as_deref(),
    )
    .await?;
    Ok(Json(ApiResponse::ok(PaginatedResponse::new(
        items,
        query.page_num,
        query.page_size,
        total as u64,
    ))))
}

async fn detail(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<PersistentLogin> {
    let row = db::persistent_logins::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Persistent login"))?;
    Ok(Json(ApiResponse::ok(row)))
}

async fn save(
    State(state): State<AppState>,
    Json(payload): Json<PersistentLoginSave>,
) -> ApiResult<bool> {
    validate(&payload)?;
    let saved = db::persistent_logins::save(&state.pool, &payload).await?;
    if !saved {
        return Err(AppError::not_found("Persistent login").into());
    }
    Ok(Json(ApiResponse::ok(true)))
}

async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<bool> {
    let removed = db::persistent_logins::remove(&state.pool, id).await?;
    if !removed {
        return Err(AppError::not_found("Persistent login").into());
    }
    Ok(Json(ApiResponse::ok(true)))
}
