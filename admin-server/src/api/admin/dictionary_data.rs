//! Dictionary data endpoints

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::Deserialize;
use shared::error::AppError;
use shared::models::{DictionaryData, DictionaryDataSave};
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
pub struct DictionaryDataQuery {
    #[serde(default = "default_page_num")]
    pub page_num: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    pub dict_type: Option<String>,
    pub label: Option<String>,
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<DictionaryDataQuery>,
) -> ApiResult<PaginatedResponse<DictionaryData>> {
    let (items, total) = db::dictionary_data::list(
        &state.pool,
        query.page_num,
        query.page_size,
        query.dict_type.as_deref(),
        query.label.as_deref(),
    )
    .await?;
    Ok(Json(ApiResponse::ok(PaginatedResponse::new(
        items,
        query.page_num,
        query.page_size,
        total as u64,
    ))))
}

async fn detail(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<DictionaryData> {
    let entry = db::dictionary_data::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Dictionary data"))?;
    Ok(Json(ApiResponse::ok(entry)))
}

async fn save(
    State(state): State<AppState>,
    operator: Option<Extension<AuthUser>>,
    Json(payload): Json<DictionaryDataSave>,
) -> ApiResult<bool> {
    validate(&payload)?;
    let operator = operator.map(|Extension(user)| user.id);
    let saved = db::dictionary_data::save(&state.pool, &payload, operator).await?;
    if !saved {
        return Err(AppError::not_found("Dictionary data").into());
    }
    Ok(Json(ApiResponse::ok(true)))
}

async fn remove(
    State(state): State<AppState>,
    operator: Option<Extension<AuthUser>>,
    Path(id): Path<i32>,
) -> ApiResult<bool> {
    let operator = operator.map(|Extension(user)| user.id);
    let removed = db::dictionary_data::remove(&state.pool, id, operator).await?;
    if !removed {
        return Err(AppError::not_found("Dictionary data").into());
    }
    Ok(Json(ApiResponse::ok(true)))
}
