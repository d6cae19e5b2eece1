//! Community Post API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::auth::{CurrentUser, OptionalUser};
use crate::core::ServerState;
use crate::services::community;
use crate::utils::validation::{MAX_DESCRIPTION_LEN, MAX_TITLE_LEN};
use crate::utils::{AppResult, validation};
use shared::models::{PostUpdate, PostWithAuthor};

/// GET /api/community/posts/:id - 获取帖子
pub async fn get_by_id(
    State(state): State<ServerState>,
    OptionalUser(viewer): OptionalUser,
    Path(id): Path<i64>,
) -> AppResult<Json<PostWithAuthor>> {
    let post = community::get_post(state.pool(), viewer.as_ref(), id).await?;
    Ok(Json(post))
}

/// PUT /api/community/posts/:id - 更新帖子
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<PostUpdate>,
) -> AppResult<Json<PostWithAuthor>> {
    if let Some(title) = &payload.title {
        validation::validate_required_text(title, "title", MAX_TITLE_LEN)?;
    }
    validation::validate_optional_text(&payload.description, "description", MAX_DESCRIPTION_LEN)?;

    let updated = community::update_post(state.pool(), &user, id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /api/community/posts/:id - 删除帖子
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    community::delete_post(state.pool(), &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
