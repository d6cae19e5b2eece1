//! Restaurant Repository

use super::{RepoError, RepoResult};
use shared::models::{Restaurant, RestaurantCreate, RestaurantUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const RESTAURANT_SELECT: &str =
    "SELECT id, owner_id, name, address, description, created_at FROM restaurant";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Restaurant>> {
    let restaurants =
        sqlx::query_as::<_, Restaurant>(&format!("{RESTAURANT_SELECT} ORDER BY name"))
            .fetch_all(pool)
            .await?;
    Ok(restaurants)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Restaurant>> {
    let restaurant = sqlx::query_as::<_, Restaurant>(&format!("{RESTAURANT_SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(restaurant)
}

pub async fn find_by_owner(pool: &SqlitePool, owner_id: i64) -> RepoResult<Vec<Restaurant>> {
    let restaurants = sqlx::query_as::<_, Restaurant>(&format!(
        "{RESTAURANT_SELECT} WHERE owner_id = ? ORDER BY name"
    ))
    .bind(owner_id)
    .fetch_all(pool)
    .await?;
    Ok(restaurants)
}

pub async fn create(
    pool: &SqlitePool,
    owner_id: i64,
    data: RestaurantCreate,
) -> RepoResult<Restaurant> {
    let id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO restaurant (id, owner_id, name, address, description, created_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(owner_id)
    .bind(&data.name)
    .bind(&data.address)
    .bind(&data.description)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create restaurant".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: RestaurantUpdate) -> RepoResult<Restaurant> {
    let rows = sqlx::query(
        "UPDATE restaurant SET
            name = COALESCE(?1, name),
            address = COALESCE(?2, address),
            description = COALESCE(?3, description)
         WHERE id = ?4",
    )
    .bind(&data.name)
    .bind(&data.address)
    .bind(&data.description)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Restaurant {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Restaurant {id} not found")))
}

/// Hard delete; menus, tables, slots and reservations cascade via FKs
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM restaurant WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
