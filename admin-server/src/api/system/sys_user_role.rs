//! System user-role link endpoints

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use shared::error::AppError;
use shared::models::{SysUserRole, SysUserRoleSave};
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
pub struct SysUserRoleQuery {
    #[serde(default = "default_page_num")]
    pub page_num: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    pub user_id: Option<i32>,
    pub role_id: Option<i32>,
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<SysUserRoleQuery>,
) -> ApiResult<PaginatedResponse<SysUserRole>> {
    let (items, total) = db::sys_user_roles::list(
        &state.pool,
        query.page_num,
        query.page_size,
        query.user_id,
        query.role_id,
    )
    .await?;
    Ok(Json(ApiResponse::ok(PaginatedResponse::new(
        items,
        query.page_num,
        query.page_size,
        total as u64,
    ))))
}

async fn detail(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<SysUserRole> {
    let link = db::sys_user_roles::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("User role"))?;
    Ok(Json(ApiResponse::ok(link)))
}

async fn save(
    State(state): State<AppState>,
    Json(payload): Json<SysUserRoleSave>,
) -> ApiResult<bool> {
    validate(&payload)?;
    let saved = db::sys_user_roles::save(&state.pool, &payload).await?;
    if !saved {
        return Err(AppError::not_found("User role").into());
    }
    Ok(Json(ApiResponse::ok(true)))
}

async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<bool> {
    let removed = db::sys_user_roles::remove(&state.pool, id).await?;
    if !removed {
        return Err(AppError::not_found("User role").into());
    }
    Ok(Json(ApiResponse::ok(true)))
}
