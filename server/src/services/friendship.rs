//! Friendship and friend-request state machine
//!
//! A request moves PENDING -> ACCEPTED | REJECTED and never leaves a
//! terminal state. Accepting a FRIEND_REQUEST creates the friendship and
//! notifies the original sender; rejecting has no side effect.

use sqlx::SqlitePool;

use crate::auth::CurrentUser;
use crate::db::repository::{RepoError, friendship, notification, user};
use crate::utils::{AppError, AppResult};
use shared::models::{Friend, Notification, NotificationRow};
use shared::types::{NotificationKind, RequestStatus, RequestType};

fn into_notification(row: NotificationRow) -> AppResult<Notification> {
    Notification::try_from(row).map_err(AppError::database)
}

/// Send a friend request from `sender` to `receiver_id`
pub async fn send_friend_request(
    pool: &SqlitePool,
    sender: &CurrentUser,
    receiver_id: i64,
) -> AppResult<Notification> {
    if sender.id == receiver_id {
        return Err(AppError::validation(
            "Cannot send a friend request to yourself",
        ));
    }

    let receiver = user::find_by_id(pool, receiver_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {receiver_id} not found")))?;

    if friendship::exists(pool, sender.id, receiver.id).await? {
        return Err(AppError::conflict("You are already friends with this user"));
    }

    // A PENDING request in either direction blocks a new one
    if notification::pending_request_between(
        pool,
        sender.id,
        receiver.id,
        RequestType::FriendRequest,
    )
    .await?
    {
        return Err(AppError::conflict(
            "A pending friend request already exists between you",
        ));
    }

    let message = format!("{} wants to be your friend", sender.name);
    let row = notification::create_request(
        pool,
        sender.id,
        receiver.id,
        RequestType::FriendRequest,
        &message,
    )
    .await?;

    tracing::info!(
        sender_id = sender.id,
        receiver_id = receiver.id,
        "Friend request sent"
    );

    into_notification(row)
}

/// Load a request row, failing for unknown ids and plain notifications
async fn load_request(pool: &SqlitePool, request_id: i64) -> AppResult<NotificationRow> {
    let row = notification::find_by_id(pool, request_id)
        .await?
        .filter(|row| row.kind == NotificationKind::Request)
        .ok_or_else(|| AppError::not_found(format!("Request {request_id} not found")))?;
    Ok(row)
}

/// Shared guards for accept/reject: actor must be the receiver and the
/// request must still be PENDING
fn check_actionable(row: &NotificationRow, actor: &CurrentUser) -> AppResult<()> {
    if row.receiver_id != actor.id {
        return Err(AppError::forbidden(
            "Only the receiver can act on a request",
        ));
    }
    if row.status != Some(RequestStatus::Pending) {
        return Err(AppError::business_rule("Request is no longer pending"));
    }
    Ok(())
}

/// Accept a pending request addressed to `actor`
pub async fn accept_request(
    pool: &SqlitePool,
    actor: &CurrentUser,
    request_id: i64,
) -> AppResult<Notification> {
    let row = load_request(pool, request_id).await?;
    check_actionable(&row, actor)?;

    notification::set_status(pool, request_id, RequestStatus::Accepted).await?;

    // Type-specific side effect
    let sender_id = row.sender_id.unwrap_or_default();
    match row.request_type {
        Some(RequestType::FriendRequest) => {
            // Guarded against an existing row; a race on the unique index
            // is treated the same as the pre-check firing
            if !friendship::exists(pool, sender_id, actor.id).await? {
                match friendship::create(pool, sender_id, actor.id).await {
                    Ok(_) | Err(RepoError::Duplicate(_)) => {}
                    Err(e) => return Err(e.into()),
                }
            }

            let message = format!("{} accepted your friend request", actor.name);
            notification::create_plain(pool, sender_id, &message).await?;
        }
        Some(RequestType::CommunityInvite) => {
            // Community invites are not implemented; accepting records the
            // state transition only
            tracing::warn!(request_id, "Accepted a COMMUNITY_INVITE request (no-op)");
        }
        None => {}
    }

    tracing::info!(request_id, actor_id = actor.id, "Request accepted");

    let row = load_request(pool, request_id).await?;
    into_notification(row)
}

/// Reject a pending request addressed to `actor`
pub async fn reject_request(
    pool: &SqlitePool,
    actor: &CurrentUser,
    request_id: i64,
) -> AppResult<Notification> {
    let row = load_request(pool, request_id).await?;
    check_actionable(&row, actor)?;

    notification::set_status(pool, request_id, RequestStatus::Rejected).await?;
    tracing::info!(request_id, actor_id = actor.id, "Request rejected");

    let row = load_request(pool, request_id).await?;
    into_notification(row)
}

/// Remove an existing friendship; symmetric regardless of which side
/// initiates
pub async fn remove_friend(
    pool: &SqlitePool,
    actor: &CurrentUser,
    friend_id: i64,
) -> AppResult<()> {
    user::find_by_id(pool, friend_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {friend_id} not found")))?;

    if !friendship::exists(pool, actor.id, friend_id).await? {
        return Err(AppError::business_rule(
            "You are not friends with this user",
        ));
    }

    friendship::delete(pool, actor.id, friend_id).await?;
    tracing::info!(actor_id = actor.id, friend_id, "Friendship removed");
    Ok(())
}

/// Friends of the given user
pub async fn list_friends(pool: &SqlitePool, user_id: i64) -> AppResult<Vec<Friend>> {
    Ok(friendship::find_friends_of(pool, user_id).await?)
}

/// Symmetric friendship check
pub async fn are_friends(pool: &SqlitePool, a: i64, b: i64) -> AppResult<bool> {
    Ok(friendship::exists(pool, a, b).await?)
}
