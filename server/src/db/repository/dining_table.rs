//! Dining Table Repository

use super::{RepoError, RepoResult};
use shared::models::{DiningTable, DiningTableCreate};
use shared::util::snowflake_id;
use sqlx::SqlitePool;

const TABLE_SELECT: &str =
    "SELECT id, restaurant_id, number, capacity, outside FROM dining_table";

pub async fn find_by_restaurant(
    pool: &SqlitePool,
    restaurant_id: i64,
) -> RepoResult<Vec<DiningTable>> {
    let tables = sqlx::query_as::<_, DiningTable>(&format!(
        "{TABLE_SELECT} WHERE restaurant_id = ? ORDER BY number"
    ))
    .bind(restaurant_id)
    .fetch_all(pool)
    .await?;
    Ok(tables)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<DiningTable>> {
    let table = sqlx::query_as::<_, DiningTable>(&format!("{TABLE_SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(table)
}

pub async fn find_by_number(
    pool: &SqlitePool,
    restaurant_id: i64,
    number: i64,
) -> RepoResult<Option<DiningTable>> {
    let table = sqlx::query_as::<_, DiningTable>(&format!(
        "{TABLE_SELECT} WHERE restaurant_id = ? AND number = ? LIMIT 1"
    ))
    .bind(restaurant_id)
    .bind(number)
    .fetch_optional(pool)
    .await?;
    Ok(table)
}

/// Candidate tables for an allocation: enough capacity, ascending table
/// number so the first-fit scan is deterministic
pub async fn find_with_capacity(
    pool: &SqlitePool,
    restaurant_id: i64,
    min_capacity: i64,
) -> RepoResult<Vec<DiningTable>> {
    let tables = sqlx::query_as::<_, DiningTable>(&format!(
        "{TABLE_SELECT} WHERE restaurant_id = ? AND capacity >= ? ORDER BY number"
    ))
    .bind(restaurant_id)
    .bind(min_capacity)
    .fetch_all(pool)
    .await?;
    Ok(tables)
}

pub async fn create(
    pool: &SqlitePool,
    restaurant_id: i64,
    data: DiningTableCreate,
) -> RepoResult<DiningTable> {
    // Check duplicate number in same restaurant
    if find_by_number(pool, restaurant_id, data.number)
        .await?
        .is_some()
    {
        return Err(RepoError::Duplicate(format!(
            "Table {} already exists in this restaurant",
            data.number
        )));
    }

    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO dining_table (id, restaurant_id, number, capacity, outside)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(restaurant_id)
    .bind(data.number)
    .bind(data.capacity)
    .bind(data.outside)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create dining table".into()))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM dining_table WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
