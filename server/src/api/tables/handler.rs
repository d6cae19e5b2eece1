//! Dining Table API Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::restaurants::require_owned_restaurant;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::dining_table;
use crate::utils::{AppError, AppResult};

/// DELETE /api/tables/:id - 删除桌台
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    let table = dining_table::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Table {id} not found")))?;
    require_owned_restaurant(state.pool(), &user, table.restaurant_id).await?;

    dining_table::delete(state.pool(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
