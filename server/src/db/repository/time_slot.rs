//! Time Slot Repository

use super::{RepoError, RepoResult};
use shared::models::{TimeSlot, TimeSlotCreate};
use shared::types::DayOfWeek;
use shared::util::snowflake_id;
use sqlx::SqlitePool;

const SLOT_SELECT: &str =
    "SELECT id, restaurant_id, day_of_week, start_hour, end_hour FROM time_slot";

pub async fn find_by_restaurant(
    pool: &SqlitePool,
    restaurant_id: i64,
) -> RepoResult<Vec<TimeSlot>> {
    let slots = sqlx::query_as::<_, TimeSlot>(&format!(
        "{SLOT_SELECT} WHERE restaurant_id = ? ORDER BY day_of_week, start_hour"
    ))
    .bind(restaurant_id)
    .fetch_all(pool)
    .await?;
    Ok(slots)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<TimeSlot>> {
    let slot = sqlx::query_as::<_, TimeSlot>(&format!("{SLOT_SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(slot)
}

pub async fn find_duplicate(
    pool: &SqlitePool,
    restaurant_id: i64,
    day: DayOfWeek,
    start_hour: f64,
    end_hour: f64,
) -> RepoResult<Option<TimeSlot>> {
    let slot = sqlx::query_as::<_, TimeSlot>(&format!(
        "{SLOT_SELECT} WHERE restaurant_id = ? AND day_of_week = ?
         AND start_hour = ? AND end_hour = ? LIMIT 1"
    ))
    .bind(restaurant_id)
    .bind(day)
    .bind(start_hour)
    .bind(end_hour)
    .fetch_optional(pool)
    .await?;
    Ok(slot)
}

pub async fn create(
    pool: &SqlitePool,
    restaurant_id: i64,
    data: TimeSlotCreate,
) -> RepoResult<TimeSlot> {
    // No two slots for the same restaurant/day may share start & end
    if find_duplicate(
        pool,
        restaurant_id,
        data.day_of_week,
        data.start_hour,
        data.end_hour,
    )
    .await?
    .is_some()
    {
        return Err(RepoError::Duplicate(
            "An identical time slot already exists for this day".into(),
        ));
    }

    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO time_slot (id, restaurant_id, day_of_week, start_hour, end_hour)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(restaurant_id)
    .bind(data.day_of_week)
    .bind(data.start_hour)
    .bind(data.end_hour)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create time slot".into()))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM time_slot WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
