//! Time Slot API Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::restaurants::require_owned_restaurant;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::time_slot;
use crate::utils::{AppError, AppResult};

/// DELETE /api/timeslots/:id - 删除时段
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    let slot = time_slot::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Time slot {id} not found")))?;
    require_owned_restaurant(state.pool(), &user, slot.restaurant_id).await?;

    time_slot::delete(state.pool(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
