//! Reservation API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::reservation;
use crate::utils::AppResult;
use shared::models::{Reservation, ReservationCreate, ReservationView};

/// POST /api/reservations - 创建预订 (服务端分配桌台)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ReservationCreate>,
) -> AppResult<(StatusCode, Json<Reservation>)> {
    let created = reservation::create_reservation(state.pool(), &user, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/me/reservations - 当前用户的预订
pub async fn list_mine(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<ReservationView>>> {
    let views = reservation::list_my_reservations(state.pool(), user.id).await?;
    Ok(Json(views))
}

/// POST /api/reservations/:id/cancel - 取消预订
pub async fn cancel(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    reservation::cancel_reservation(state.pool(), &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct AddParticipantRequest {
    pub customer_id: i64,
}

/// POST /api/reservations/:id/participants - 添加同行好友
pub async fn add_participant(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<AddParticipantRequest>,
) -> AppResult<StatusCode> {
    reservation::add_participant(state.pool(), &user, id, payload.customer_id).await?;
    Ok(StatusCode::CREATED)
}
