//! Reservation Repository

use super::{RepoError, RepoResult};
use chrono::NaiveDate;
use shared::models::{Participant, Reservation, ReservationDetailRow};
use shared::types::ReservationStatus;
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const RESERVATION_SELECT: &str = "SELECT id, customer_id, restaurant_id, time_slot_id, \
     table_id, num_guests, date, status, created_at FROM reservation";

const DETAIL_SELECT: &str = "SELECT r.id, r.customer_id, r.restaurant_id, \
     rest.name AS restaurant_name, r.time_slot_id, r.table_id, t.number AS table_number, \
     r.num_guests, r.date, r.status, r.created_at \
     FROM reservation r \
     JOIN restaurant rest ON rest.id = r.restaurant_id \
     JOIN dining_table t ON t.id = r.table_id";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Reservation>> {
    let reservation =
        sqlx::query_as::<_, Reservation>(&format!("{RESERVATION_SELECT} WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(reservation)
}

/// Whether a non-cancelled reservation already occupies the
/// (table, time_slot) pair
pub async fn occupies_table_slot(
    pool: &SqlitePool,
    table_id: i64,
    time_slot_id: i64,
) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM reservation
         WHERE table_id = ? AND time_slot_id = ? AND status != 'CANCELLED'",
    )
    .bind(table_id)
    .bind(time_slot_id)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

#[allow(clippy::too_many_arguments)]
pub async fn create(
    pool: &SqlitePool,
    customer_id: i64,
    restaurant_id: i64,
    time_slot_id: i64,
    table_id: i64,
    num_guests: i64,
    date: NaiveDate,
) -> RepoResult<Reservation> {
    let id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO reservation
            (id, customer_id, restaurant_id, time_slot_id, table_id, num_guests, date, status, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, 'CONFIRMED', ?)",
    )
    .bind(id)
    .bind(customer_id)
    .bind(restaurant_id)
    .bind(time_slot_id)
    .bind(table_id)
    .bind(num_guests)
    .bind(date)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create reservation".into()))
}

pub async fn find_detail_by_customer(
    pool: &SqlitePool,
    customer_id: i64,
) -> RepoResult<Vec<ReservationDetailRow>> {
    let rows = sqlx::query_as::<_, ReservationDetailRow>(&format!(
        "{DETAIL_SELECT} WHERE r.customer_id = ? ORDER BY r.date DESC, r.created_at DESC"
    ))
    .bind(customer_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn set_status(
    pool: &SqlitePool,
    id: i64,
    status: ReservationStatus,
) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE reservation SET status = ? WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Reservation {id} not found")));
    }
    Ok(())
}

// ── Participations ──────────────────────────────────────────────────

pub async fn participation_exists(
    pool: &SqlitePool,
    reservation_id: i64,
    customer_id: i64,
) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM reservation_participation
         WHERE reservation_id = ? AND customer_id = ?",
    )
    .bind(reservation_id)
    .bind(customer_id)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

pub async fn add_participant(
    pool: &SqlitePool,
    reservation_id: i64,
    customer_id: i64,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO reservation_participation (id, reservation_id, customer_id, joined_at)
         VALUES (?, ?, ?, ?)",
    )
    .bind(snowflake_id())
    .bind(reservation_id)
    .bind(customer_id)
    .bind(now_millis())
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find_participants(
    pool: &SqlitePool,
    reservation_id: i64,
) -> RepoResult<Vec<Participant>> {
    let participants = sqlx::query_as::<_, Participant>(
        "SELECT p.customer_id, u.name, p.joined_at
         FROM reservation_participation p
         JOIN user u ON u.id = p.customer_id
         WHERE p.reservation_id = ?
         ORDER BY p.joined_at",
    )
    .bind(reservation_id)
    .fetch_all(pool)
    .await?;
    Ok(participants)
}
