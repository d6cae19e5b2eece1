//! Notification API Handlers
//!
//! One listing returns plain notifications and requests alike; the
//! `type` discriminator tells them apart.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::notification;
use crate::utils::{AppError, AppResult};
use shared::models::Notification;

/// GET /api/me/notifications - 当前用户的通知 (含请求)
pub async fn list_mine(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Notification>>> {
    let rows = notification::find_by_receiver(state.pool(), user.id).await?;
    let notifications = rows
        .into_iter()
        .map(Notification::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(AppError::database)?;
    Ok(Json(notifications))
}

/// POST /api/notifications/:id/read - 标记已读 (幂等)
pub async fn mark_read(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    let row = notification::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Notification {id} not found")))?;

    if row.receiver_id != user.id {
        return Err(AppError::forbidden(
            "Only the receiver can mark a notification as read",
        ));
    }

    notification::mark_read(state.pool(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
