//! Notification Model
//!
//! A request *is* a notification: both live in the `notification` table,
//! discriminated by `kind`, and one listing returns both. The Rust side is
//! the [`Notification`] tagged union; `instanceof`-style checks become
//! pattern matches.

use serde::{Deserialize, Serialize};

use crate::types::{NotificationKind, RequestStatus, RequestType};

/// Flat row as stored in SQLite (request columns are NULL for plain
/// notifications, sender_name is joined from `user`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct NotificationRow {
    pub id: i64,
    pub receiver_id: i64,
    pub message: String,
    pub kind: NotificationKind,
    pub is_read: bool,
    pub created_at: i64,
    pub sender_id: Option<i64>,
    pub sender_name: Option<String>,
    pub request_type: Option<RequestType>,
    pub status: Option<RequestStatus>,
}

/// Notification as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Notification {
    Plain {
        id: i64,
        receiver_id: i64,
        message: String,
        is_read: bool,
        created_at: i64,
    },
    Request {
        id: i64,
        receiver_id: i64,
        message: String,
        is_read: bool,
        created_at: i64,
        sender_id: i64,
        sender_name: Option<String>,
        request_type: RequestType,
        status: RequestStatus,
    },
}

impl Notification {
    pub fn id(&self) -> i64 {
        match self {
            Notification::Plain { id, .. } | Notification::Request { id, .. } => *id,
        }
    }

    pub fn receiver_id(&self) -> i64 {
        match self {
            Notification::Plain { receiver_id, .. } | Notification::Request { receiver_id, .. } => {
                *receiver_id
            }
        }
    }
}

impl TryFrom<NotificationRow> for Notification {
    type Error = String;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        match row.kind {
            NotificationKind::Plain => Ok(Notification::Plain {
                id: row.id,
                receiver_id: row.receiver_id,
                message: row.message,
                is_read: row.is_read,
                created_at: row.created_at,
            }),
            NotificationKind::Request => Ok(Notification::Request {
                id: row.id,
                receiver_id: row.receiver_id,
                message: row.message,
                is_read: row.is_read,
                created_at: row.created_at,
                sender_id: row
                    .sender_id
                    .ok_or_else(|| format!("request {} has no sender", row.id))?,
                sender_name: row.sender_name,
                request_type: row
                    .request_type
                    .ok_or_else(|| format!("request {} has no request_type", row.id))?,
                status: row
                    .status
                    .ok_or_else(|| format!("request {} has no status", row.id))?,
            }),
        }
    }
}
