//! Restaurant API Handlers
//!
//! Plain CRUD plus the nested table/time-slot/menu-item collections.
//! Ownership: every write requires the acting business to own the
//! restaurant (admins pass).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use sqlx::SqlitePool;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{dining_table, menu_item, restaurant, time_slot};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_DESCRIPTION_LEN, MAX_NAME_LEN, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{
    DiningTable, DiningTableCreate, MenuItem, MenuItemCreate, MenuItemDetail, Restaurant,
    RestaurantCreate, RestaurantUpdate, TimeSlot, TimeSlotCreate,
};

/// Load a restaurant and check that `user` owns it
pub(crate) async fn require_owned_restaurant(
    pool: &SqlitePool,
    user: &CurrentUser,
    restaurant_id: i64,
) -> AppResult<Restaurant> {
    let found = restaurant::find_by_id(pool, restaurant_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Restaurant {restaurant_id} not found")))?;
    if found.owner_id != user.id && !user.is_admin() {
        return Err(AppError::forbidden("You do not own this restaurant"));
    }
    Ok(found)
}

/// GET /api/restaurants - 获取所有餐厅
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Restaurant>>> {
    let restaurants = restaurant::find_all(state.pool()).await?;
    Ok(Json(restaurants))
}

/// GET /api/restaurants/:id - 获取单个餐厅
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Restaurant>> {
    let found = restaurant::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Restaurant {id} not found")))?;
    Ok(Json(found))
}

/// POST /api/restaurants - 创建餐厅
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<RestaurantCreate>,
) -> AppResult<(StatusCode, Json<Restaurant>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_DESCRIPTION_LEN)?;

    let created = restaurant::create(state.pool(), user.id, payload).await?;
    tracing::info!(restaurant_id = created.id, owner_id = user.id, "Restaurant created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/restaurants/:id - 更新餐厅
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<RestaurantUpdate>,
) -> AppResult<Json<Restaurant>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(address) = &payload.address {
        validate_required_text(address, "address", MAX_ADDRESS_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_DESCRIPTION_LEN)?;

    require_owned_restaurant(state.pool(), &user, id).await?;
    let updated = restaurant::update(state.pool(), id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /api/restaurants/:id - 删除餐厅 (级联删除桌台/时段/菜单)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    require_owned_restaurant(state.pool(), &user, id).await?;
    restaurant::delete(state.pool(), id).await?;
    tracing::info!(restaurant_id = id, actor_id = user.id, "Restaurant deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ── Nested collections ──────────────────────────────────────────────

/// GET /api/restaurants/:id/tables - 餐厅的所有桌台
pub async fn list_tables(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<DiningTable>>> {
    restaurant::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Restaurant {id} not found")))?;
    let tables = dining_table::find_by_restaurant(state.pool(), id).await?;
    Ok(Json(tables))
}

/// POST /api/restaurants/:id/tables - 创建桌台
pub async fn create_table(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<(StatusCode, Json<DiningTable>)> {
    if payload.number <= 0 {
        return Err(AppError::validation("table number must be greater than 0"));
    }
    if payload.capacity <= 0 {
        return Err(AppError::validation("capacity must be greater than 0"));
    }

    require_owned_restaurant(state.pool(), &user, id).await?;
    let created = dining_table::create(state.pool(), id, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/restaurants/:id/timeslots - 餐厅的所有时段
pub async fn list_timeslots(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<TimeSlot>>> {
    restaurant::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Restaurant {id} not found")))?;
    let slots = time_slot::find_by_restaurant(state.pool(), id).await?;
    Ok(Json(slots))
}

/// POST /api/restaurants/:id/timeslots - 创建时段
pub async fn create_timeslot(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<TimeSlotCreate>,
) -> AppResult<(StatusCode, Json<TimeSlot>)> {
    if !(0.0..=24.0).contains(&payload.start_hour)
        || !(0.0..=24.0).contains(&payload.end_hour)
        || payload.start_hour >= payload.end_hour
    {
        return Err(AppError::validation(
            "time slot hours must satisfy 0 <= start < end <= 24",
        ));
    }

    require_owned_restaurant(state.pool(), &user, id).await?;
    let created = time_slot::create(state.pool(), id, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/restaurants/:id/menu-items - 餐厅菜单
pub async fn list_menu_items(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<MenuItem>>> {
    restaurant::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Restaurant {id} not found")))?;
    let items = menu_item::find_by_restaurant(state.pool(), id).await?;
    Ok(Json(items))
}

/// POST /api/restaurants/:id/menu-items - 创建菜品/饮品
pub async fn create_menu_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<(StatusCode, Json<MenuItem>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_DESCRIPTION_LEN)?;
    if !payload.price.is_finite() || payload.price < 0.0 {
        return Err(AppError::validation("price must be a non-negative number"));
    }
    match &payload.detail {
        MenuItemDetail::Dish { course_type, .. } => {
            validate_required_text(course_type, "course_type", MAX_NAME_LEN)?;
        }
        MenuItemDetail::Drink { drink_type } => {
            validate_required_text(drink_type, "drink_type", MAX_NAME_LEN)?;
        }
    }

    require_owned_restaurant(state.pool(), &user, id).await?;
    let created = menu_item::create(state.pool(), id, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
