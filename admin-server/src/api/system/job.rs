//! Scheduled job endpoints

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::Deserialize;
use shared::error::AppError;
use shared::models::{Job, JobSave};
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
pub struct JobQuery {
    #[serde(default = "default_page_num")]
    pub page_num: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    pub job_name: Option<String>,
    pub job_group: Option<String>,
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<JobQuery>,
) -> ApiResult<PaginatedResponse<Job>> {
    let (items, total) = db::jobs::list(
        &state.pool,
        query.page_num,
        query.page_size,
        query.job_name.as_deref(),
        query.job_group.as_deref(),
    )
    .await?;
    Ok(Json(ApiResponse::ok(PaginatedResponse::new(
        items,
        query.page_num,
        query.page_size,
        total as u64,
    ))))
}

async fn detail(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<Job> {
    let job = db::jobs::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Job"))?;
    Ok(Json(ApiResponse::ok(job)))
}

async fn save(
    State(state): State<AppState>,
    operator: Option<Extension<AuthUser>>,
    Json(payload): Json<JobSave>,
) -> ApiResult<bool> {
    validate(&payload)?;
    let operator = operator.map(|Extension(user)| user.id);
    let saved = db::jobs::save(&state.pool, &payload, operator).await?;
    if !saved {
        return Err(AppError::not_found("Job").into());
    }
    Ok(Json(ApiResponse::ok(true)))
}

async fn remove(
    State(state): State<AppState>,
    operator: Option<Extension<AuthUser>>,
    Path(id): Path<i32>,
) -> ApiResult<bool> {
    let operator = operator.map(|Extension(user)| user.id);
    let removed = db::jobs::remove(&state.pool, id, operator).await?;
    if !removed {
        return Err(AppError::not_found("Job").into());
    }
    Ok(Json(ApiResponse::ok(true)))
}
