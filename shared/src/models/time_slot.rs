//! Time Slot Model

use serde::{Deserialize, Serialize};

use crate::types::DayOfWeek;

/// Recurring weekly service window of a restaurant
///
/// Hours are fractional (18.5 = 18:30); invariant 0 <= start < end <= 24.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct TimeSlot {
    pub id: i64,
    pub restaurant_id: i64,
    pub day_of_week: DayOfWeek,
    pub start_hour: f64,
    pub end_hour: f64,
}

/// Create time slot payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlotCreate {
    pub day_of_week: DayOfWeek,
    pub start_hour: f64,
    pub end_hour: f64,
}
