//! 用户接口处理器

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use tracing::info;

use super::model::{User, UserPayload};
use crate::app::AppState;
use crate::core::error::CoreError;

/// 默认每页条数
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// 搜索查询参数
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub name: Option<String>,
    #[serde(default)]
    pub page: usize,
    #[serde(default = "default_page_size")]
    pub size: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.users.list())
}

/// GET /api/users/:id，不存在时返回 `null`
pub async fn get_user(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Option<User>>, CoreError> {
    let Path(id) = path?;
    Ok(Json(state.users.get(id)))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> Result<Json<User>, CoreError> {
    let Json(payload) = payload?;
    let new_user = payload.into_new_user()?;

    let user = state.users.create(new_user);
    info!(id = user.id, "用户创建成功");
    Ok(Json(user))
}

/// PUT /api/users/:id
///
/// 整体替换；目标 id 不存在时会直接创建该记录。
pub async fn update_user(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> Result<Json<User>, CoreError> {
    let Path(id) = path?;
    let Json(payload) = payload?;
    let new_user = payload.into_new_user()?;

    let user = state.users.replace(id, new_user);
    info!(id, "用户更新成功");
    Ok(Json(user))
}

/// DELETE /api/users/:id，重复删除同样返回 200
pub async fn delete_user(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, CoreError> {
    let Path(id) = path?;
    if state.users.delete(id).is_some() {
        info!(id, "用户删除成功");
    }
    Ok(StatusCode::OK)
}

/// GET /api/users/search?name=&page=&size=
pub async fn search_users(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<User>>, CoreError> {
    let Query(query) = query?;
    Ok(Json(state.users.search(
        query.name.as_deref(),
        query.page,
        query.size,
    )))
}
