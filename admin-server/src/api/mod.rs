//! API routes for the admin console

pub mod admin;
pub mod auth;
pub mod system;

use axum::routing::post;
use axum::{Json, Router};
use shared::response::ApiResponse;

use crate::error::ServiceError;
use crate::security;
use crate::state::AppState;

/// Handler result: success envelope or a service error turned into the
/// error envelope
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ServiceError>;

pub(crate) fn default_page_num() -> u32 {
    1
}

pub(crate) fn default_page_size() -> u32 {
    10
}

/// Create the combined router, wrapped in the security pipeline
pub fn create_router(state: AppState) -> Router {
    let security_cfg = state.security.clone();

    let admin = Router::new()
        .nest("/adminNotice", admin::notice::routes())
        .nest("/adminRole", admin::role::routes())
        .nest("/adminUserRole", admin::user_role::routes())
        .nest("/adminDictionaryData", admin::dictionary_data::routes())
        .nest("/adminPersistentLogins", admin::persistent_logins::routes());

    let system = Router::new()
        .nest("/sysJob", system::job::routes())
        .nest("/sysUserRole", system::sys_user_role::routes())
        .nest("/sysRoleMenu", system::role_menu::routes())
        .nest("/sysRoleDepartment", system::role_department::routes());

    let router = Router::new()
        .nest("/admin/api", admin)
        .nest("/system/api", system)
        .route(&security_cfg.login_processing_url, post(auth::login))
        .route(&security_cfg.logout_url, post(auth::logout))
        .with_state(state.clone());

    security::apply(router, state)
}
