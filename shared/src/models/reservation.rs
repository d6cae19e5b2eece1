//! Reservation Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::ReservationStatus;

/// Reservation entity: one table, one time slot, one date, one creator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: i64,
    pub customer_id: i64,
    pub restaurant_id: i64,
    pub time_slot_id: i64,
    pub table_id: i64,
    pub num_guests: i64,
    pub date: NaiveDate,
    pub status: ReservationStatus,
    pub created_at: i64,
}

/// Create reservation payload; the table is chosen by the server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCreate {
    pub restaurant_id: i64,
    pub time_slot_id: i64,
    pub num_guests: i64,
    pub date: NaiveDate,
}

/// Reservation joined with restaurant/table/slot context (list views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ReservationDetailRow {
    pub id: i64,
    pub customer_id: i64,
    pub restaurant_id: i64,
    pub restaurant_name: String,
    pub time_slot_id: i64,
    pub table_id: i64,
    pub table_number: i64,
    pub num_guests: i64,
    pub date: NaiveDate,
    pub status: ReservationStatus,
    pub created_at: i64,
}

/// Invited/joined guest of a reservation (distinct from the creator)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Participant {
    pub customer_id: i64,
    pub name: String,
    pub joined_at: i64,
}

/// Reservation detail plus its participants, as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationView {
    #[serde(flatten)]
    pub reservation: ReservationDetailRow,
    pub participants: Vec<Participant>,
}
