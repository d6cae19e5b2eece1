//! Friends & Friend Request API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::notification;
use crate::services::friendship;
use crate::utils::{AppError, AppResult};
use shared::models::{Friend, Notification};
use shared::types::RequestType;

#[derive(Debug, Deserialize)]
pub struct SendRequestQuery {
    #[serde(rename = "type")]
    pub request_type: RequestType,
}

/// POST /api/users/:id/requests?type=FRIEND_REQUEST - 发送好友请求
pub async fn send_request(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(receiver_id): Path<i64>,
    Query(query): Query<SendRequestQuery>,
) -> AppResult<(StatusCode, Json<Notification>)> {
    let request = match query.request_type {
        RequestType::FriendRequest => {
            friendship::send_friend_request(state.pool(), &user, receiver_id).await?
        }
        RequestType::CommunityInvite => {
            return Err(AppError::validation(
                "COMMUNITY_INVITE requests are not supported yet",
            ));
        }
    };
    Ok((StatusCode::CREATED, Json(request)))
}

/// POST /api/requests/:id/accept - 接受请求
pub async fn accept(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Notification>> {
    let request = friendship::accept_request(state.pool(), &user, id).await?;
    Ok(Json(request))
}

/// POST /api/requests/:id/reject - 拒绝请求
pub async fn reject(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Notification>> {
    let request = friendship::reject_request(state.pool(), &user, id).await?;
    Ok(Json(request))
}

/// GET /api/me/requests - 待处理的请求
pub async fn list_pending(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Notification>>> {
    let rows = notification::find_pending_for(state.pool(), user.id).await?;
    let requests = rows
        .into_iter()
        .map(Notification::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(AppError::database)?;
    Ok(Json(requests))
}

/// GET /api/me/friends - 好友列表
pub async fn list_friends(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Friend>>> {
    let friends = friendship::list_friends(state.pool(), user.id).await?;
    Ok(Json(friends))
}

/// DELETE /api/friends/:id - 删除好友
pub async fn remove_friend(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(friend_id): Path<i64>,
) -> AppResult<StatusCode> {
    friendship::remove_friend(state.pool(), &user, friend_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
