//! Notification Repository
//!
//! Plain notifications and requests share one table; queries LEFT JOIN the
//! sender for display names.

use super::{RepoError, RepoResult};
use shared::models::NotificationRow;
use shared::types::{RequestStatus, RequestType};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const NOTIFICATION_SELECT: &str = "SELECT n.id, n.receiver_id, n.message, n.kind, \
     n.is_read, n.created_at, n.sender_id, u.name AS sender_name, n.request_type, n.status \
     FROM notification n \
     LEFT JOIN user u ON u.id = n.sender_id";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<NotificationRow>> {
    let row =
        sqlx::query_as::<_, NotificationRow>(&format!("{NOTIFICATION_SELECT} WHERE n.id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(row)
}

pub async fn find_by_receiver(
    pool: &SqlitePool,
    receiver_id: i64,
) -> RepoResult<Vec<NotificationRow>> {
    let rows = sqlx::query_as::<_, NotificationRow>(&format!(
        "{NOTIFICATION_SELECT} WHERE n.receiver_id = ? ORDER BY n.created_at DESC"
    ))
    .bind(receiver_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Pending requests addressed to a user
pub async fn find_pending_for(
    pool: &SqlitePool,
    receiver_id: i64,
) -> RepoResult<Vec<NotificationRow>> {
    let rows = sqlx::query_as::<_, NotificationRow>(&format!(
        "{NOTIFICATION_SELECT} WHERE n.receiver_id = ? AND n.kind = 'REQUEST'
         AND n.status = 'PENDING' ORDER BY n.created_at DESC"
    ))
    .bind(receiver_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// A PENDING request of the given type in *either* direction between two
/// users
pub async fn pending_request_between(
    pool: &SqlitePool,
    a: i64,
    b: i64,
    request_type: RequestType,
) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM notification
         WHERE kind = 'REQUEST' AND request_type = ?1 AND status = 'PENDING'
           AND ((sender_id = ?2 AND receiver_id = ?3) OR (sender_id = ?3 AND receiver_id = ?2))",
    )
    .bind(request_type)
    .bind(a)
    .bind(b)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

pub async fn create_plain(
    pool: &SqlitePool,
    receiver_id: i64,
    message: &str,
) -> RepoResult<NotificationRow> {
    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO notification (id, receiver_id, message, kind, is_read, created_at)
         VALUES (?, ?, ?, 'PLAIN', 0, ?)",
    )
    .bind(id)
    .bind(receiver_id)
    .bind(message)
    .bind(now_millis())
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create notification".into()))
}

pub async fn create_request(
    pool: &SqlitePool,
    sender_id: i64,
    receiver_id: i64,
    request_type: RequestType,
    message: &str,
) -> RepoResult<NotificationRow> {
    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO notification
            (id, receiver_id, message, kind, is_read, created_at, sender_id, request_type, status)
         VALUES (?, ?, ?, 'REQUEST', 0, ?, ?, ?, 'PENDING')",
    )
    .bind(id)
    .bind(receiver_id)
    .bind(message)
    .bind(now_millis())
    .bind(sender_id)
    .bind(request_type)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create request".into()))
}

pub async fn set_status(pool: &SqlitePool, id: i64, status: RequestStatus) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE notification SET status = ? WHERE id = ? AND kind = 'REQUEST'")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Request {id} not found")));
    }
    Ok(())
}

pub async fn mark_read(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE notification SET is_read = 1 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Notification {id} not found")));
    }
    Ok(())
}
