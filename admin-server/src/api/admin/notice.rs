//! Notice endpoints

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::Deserialize;
use shared::error::AppError;
use shared::models::{Notice, NoticeSave};
use shared::response::{ApiResponse, PaginatedResponse};

use crate::api::{ApiResult, default_page_num, default_page_size};
use crate::db;
use crate::security::AuthUser;
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
pub struct NoticeQuery {
    #[serde(default = "default_page_num")]
    pub page_num: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    pub notice_type: Option<i32>,
    pub title: Option<String>,
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> ApiResult<PaginatedResponse<Notice>> {
    let (items, total) = db::notices::list(
        &state.pool,
        query.page_num,
        query.page_size,
        query.notice_type,
        query.title.as_deref(),
    )
    .await?;
    Ok(Json(ApiResponse::ok(PaginatedResponse::new(
        items,
        query.page_num,
        query.page_size,
        total as u64,
    ))))
}

async fn detail(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<Notice> {
    let notice = db::notices::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Notice"))?;
    Ok(Json(ApiResponse::ok(notice)))
}

async fn save(
    State(state): State<AppState>,
    operator: Option<Extension<AuthUser>>,
    Json(payload): Json<NoticeSave>,
) -> ApiResult<bool> {
    validate(&payload)?;
    let operator = operator.map(|Extension(user)| user.id);
    let saved = db::notices::save(&state.pool, &payload, operator).await?;
    if !saved {
        return Err(AppError::not_found("Notice").into());
    }
    Ok(Json(ApiResponse::ok(true)))
}

async fn remove(
    State(state): State<AppState>,
    operator: Option<Extension<AuthUser>>,
    Path(id): Path<i32>,
) -> ApiResult<bool> {
    let operator = operator.map(|Extension(user)| user.id);
    let removed = db::notices::remove(&state.pool, id, operator).await?;
    if !removed {
        return Err(AppError::not_found("Notice").into());
    }
    Ok(Json(ApiResponse::ok(true)))
}
