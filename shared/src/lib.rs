//! Shared types for the Plateful backend
//!
//! Entity models, client-facing DTOs and common enums used by the API
//! server. Database derives (`sqlx::FromRow`, `sqlx::Type`) are gated
//! behind the `db` feature so client-side consumers stay lightweight.

pub mod client;
pub mod models;
pub mod types;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
pub use types::{
    CommunityType, CommunityVisibility, DayOfWeek, MemberRole, NotificationKind, PostKind,
    RequestStatus, RequestType, ReservationStatus, UserRole,
};
