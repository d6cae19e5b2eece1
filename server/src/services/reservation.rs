//! Reservation creation and table allocation
//!
//! Allocation is a greedy first-fit: candidate tables (capacity >= party
//! size, ascending table number) are scanned and the first one with no
//! reservation on the same (table, time_slot) pair wins. There is no
//! attempt to minimize wasted capacity. Availability is an existence
//! check, not a unique constraint; two racing requests for the last table
//! can both pass it.

use sqlx::SqlitePool;

use crate::auth::CurrentUser;
use crate::db::repository::{dining_table, reservation, restaurant, time_slot, user};
use crate::utils::{AppError, AppResult};
use shared::models::{Reservation, ReservationCreate, ReservationView};
use shared::types::ReservationStatus;

/// Create a reservation, allocating the first free table that fits
pub async fn create_reservation(
    pool: &SqlitePool,
    customer: &CurrentUser,
    req: ReservationCreate,
) -> AppResult<Reservation> {
    if req.num_guests <= 0 {
        return Err(AppError::validation("num_guests must be greater than 0"));
    }

    let restaurant = restaurant::find_by_id(pool, req.restaurant_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Restaurant {} not found", req.restaurant_id)))?;

    let slot = time_slot::find_by_id(pool, req.time_slot_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Time slot {} not found", req.time_slot_id)))?;
    if slot.restaurant_id != restaurant.id {
        return Err(AppError::validation(
            "Time slot does not belong to the selected restaurant",
        ));
    }

    // First-fit scan over candidates ordered by table number
    let candidates =
        dining_table::find_with_capacity(pool, restaurant.id, req.num_guests).await?;
    let mut assigned = None;
    for table in candidates {
        if !reservation::occupies_table_slot(pool, table.id, slot.id).await? {
            assigned = Some(table);
            break;
        }
    }

    let table = assigned.ok_or_else(|| {
        AppError::business_rule("No tables available for the selected time slot")
    })?;

    let created = reservation::create(
        pool,
        customer.id,
        restaurant.id,
        slot.id,
        table.id,
        req.num_guests,
        req.date,
    )
    .await?;

    tracing::info!(
        reservation_id = created.id,
        customer_id = customer.id,
        restaurant_id = restaurant.id,
        table_number = table.number,
        "Reservation created"
    );

    Ok(created)
}

/// Reservations created by the given customer, newest first, with
/// participants attached
pub async fn list_my_reservations(
    pool: &SqlitePool,
    customer_id: i64,
) -> AppResult<Vec<ReservationView>> {
    let rows = reservation::find_detail_by_customer(pool, customer_id).await?;
    let mut views = Vec::with_capacity(rows.len());
    for row in rows {
        let participants = reservation::find_participants(pool, row.id).await?;
        views.push(ReservationView {
            reservation: row,
            participants,
        });
    }
    Ok(views)
}

/// Cancel a reservation; only the creator may cancel
pub async fn cancel_reservation(
    pool: &SqlitePool,
    actor: &CurrentUser,
    reservation_id: i64,
) -> AppResult<()> {
    let reservation = reservation::find_by_id(pool, reservation_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Reservation {reservation_id} not found")))?;

    if reservation.customer_id != actor.id {
        return Err(AppError::forbidden(
            "Only the reservation creator can cancel it",
        ));
    }
    if reservation.status == ReservationStatus::Cancelled {
        return Err(AppError::business_rule("Reservation is already cancelled"));
    }

    reservation::set_status(pool, reservation_id, ReservationStatus::Cancelled).await?;
    tracing::info!(reservation_id, actor_id = actor.id, "Reservation cancelled");
    Ok(())
}

/// Add an invited guest to a reservation; only the creator may invite,
/// and the creator is a participant implicitly, never via this table
pub async fn add_participant(
    pool: &SqlitePool,
    actor: &CurrentUser,
    reservation_id: i64,
    customer_id: i64,
) -> AppResult<()> {
    let reservation = reservation::find_by_id(pool, reservation_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Reservation {reservation_id} not found")))?;

    if reservation.customer_id != actor.id {
        return Err(AppError::forbidden(
            "Only the reservation creator can invite participants",
        ));
    }
    if customer_id == reservation.customer_id {
        return Err(AppError::validation(
            "The creator is already part of the reservation",
        ));
    }

    user::find_by_id(pool, customer_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {customer_id} not found")))?;

    if reservation::participation_exists(pool, reservation_id, customer_id).await? {
        return Err(AppError::conflict(
            "User already participates in this reservation",
        ));
    }

    reservation::add_participant(pool, reservation_id, customer_id).await?;
    Ok(())
}
