//! Menu Item API Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::restaurants::require_owned_restaurant;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::menu_item;
use crate::utils::{AppError, AppResult};

/// DELETE /api/menu-items/:id - 删除菜单项
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    let item = menu_item::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu item {id} not found")))?;
    require_owned_restaurant(state.pool(), &user, item.restaurant_id).await?;

    menu_item::delete(state.pool(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
