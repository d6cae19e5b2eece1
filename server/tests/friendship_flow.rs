//! Friend request / friendship state machine tests

mod common;

use common::{create_customer, test_pool};
use plateful_server::AppError;
use plateful_server::db::repository::{friendship as friendship_repo, notification};
use plateful_server::services::friendship;
use shared::models::Notification;
use shared::types::RequestStatus;

#[tokio::test]
async fn friendship_is_symmetric_and_unique() {
    let pool = test_pool().await;
    let ana = create_customer(&pool, "Ana").await;
    let bruno = create_customer(&pool, "Bruno").await;

    friendship_repo::create(&pool, ana.id, bruno.id)
        .await
        .unwrap();

    assert!(friendship::are_friends(&pool, ana.id, bruno.id).await.unwrap());
    assert!(friendship::are_friends(&pool, bruno.id, ana.id).await.unwrap());

    // The reversed pair normalizes onto the same row and must be rejected
    let err = friendship_repo::create(&pool, bruno.id, ana.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        plateful_server::db::repository::RepoError::Duplicate(_)
    ));
}

#[tokio::test]
async fn friendship_rows_are_stored_in_normalized_order() {
    let pool = test_pool().await;
    let ana = create_customer(&pool, "Ana").await;
    let bruno = create_customer(&pool, "Bruno").await;
    let (low, high) = if ana.id < bruno.id {
        (ana.id, bruno.id)
    } else {
        (bruno.id, ana.id)
    };

    // Create from the "high" side; storage order must not depend on it
    let row = friendship_repo::create(&pool, high, low).await.unwrap();
    assert_eq!(row.user_a_id, low);
    assert_eq!(row.user_b_id, high);
}

#[tokio::test]
async fn send_request_rejects_self_unknown_and_existing() {
    let pool = test_pool().await;
    let ana = create_customer(&pool, "Ana").await;
    let bruno = create_customer(&pool, "Bruno").await;

    let err = friendship::send_friend_request(&pool, &ana, ana.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = friendship::send_friend_request(&pool, &ana, 999_999)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    friendship_repo::create(&pool, ana.id, bruno.id)
        .await
        .unwrap();
    let err = friendship::send_friend_request(&pool, &ana, bruno.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn pending_request_blocks_both_directions() {
    let pool = test_pool().await;
    let ana = create_customer(&pool, "Ana").await;
    let bruno = create_customer(&pool, "Bruno").await;

    friendship::send_friend_request(&pool, &ana, bruno.id)
        .await
        .unwrap();

    let err = friendship::send_friend_request(&pool, &ana, bruno.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // The reverse direction is blocked while the first is PENDING
    let err = friendship::send_friend_request(&pool, &bruno, ana.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn accept_creates_friendship_and_notifies_sender() {
    let pool = test_pool().await;
    let ana = create_customer(&pool, "Ana").await;
    let bruno = create_customer(&pool, "Bruno").await;

    let request = friendship::send_friend_request(&pool, &ana, bruno.id)
        .await
        .unwrap();

    let (request_id, sender_id, receiver_id, status) = match &request {
        Notification::Request {
            id,
            sender_id,
            receiver_id,
            status,
            ..
        } => (*id, *sender_id, *receiver_id, *status),
        other => panic!("expected a request, got {other:?}"),
    };
    assert_eq!(sender_id, ana.id);
    assert_eq!(receiver_id, bruno.id);
    assert_eq!(status, RequestStatus::Pending);

    let accepted = friendship::accept_request(&pool, &bruno, request_id)
        .await
        .unwrap();
    match accepted {
        Notification::Request { status, .. } => assert_eq!(status, RequestStatus::Accepted),
        other => panic!("expected a request, got {other:?}"),
    }

    assert!(friendship::are_friends(&pool, ana.id, bruno.id).await.unwrap());

    // The sender receives a plain acceptance notification
    let rows = notification::find_by_receiver(&pool, ana.id).await.unwrap();
    let accepted_note = rows
        .iter()
        .find(|row| row.kind == shared::types::NotificationKind::Plain)
        .expect("acceptance notification");
    assert!(accepted_note.message.contains("accepted"));
}

#[tokio::test]
async fn accept_is_single_shot() {
    let pool = test_pool().await;
    let ana = create_customer(&pool, "Ana").await;
    let bruno = create_customer(&pool, "Bruno").await;

    let request = friendship::send_friend_request(&pool, &ana, bruno.id)
        .await
        .unwrap();
    let request_id = request.id();

    friendship::accept_request(&pool, &bruno, request_id)
        .await
        .unwrap();

    // ACCEPTED is terminal: neither accept nor reject may run again
    let err = friendship::accept_request(&pool, &bruno, request_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));

    let err = friendship::reject_request(&pool, &bruno, request_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));
}

#[tokio::test]
async fn only_the_receiver_may_act() {
    let pool = test_pool().await;
    let ana = create_customer(&pool, "Ana").await;
    let bruno = create_customer(&pool, "Bruno").await;
    let carla = create_customer(&pool, "Carla").await;

    let request = friendship::send_friend_request(&pool, &ana, bruno.id)
        .await
        .unwrap();

    // Neither the sender nor a third party can act on it
    let err = friendship::accept_request(&pool, &ana, request.id())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let err = friendship::reject_request(&pool, &carla, request.id())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn reject_has_no_side_effect() {
    let pool = test_pool().await;
    let ana = create_customer(&pool, "Ana").await;
    let bruno = create_customer(&pool, "Bruno").await;

    let request = friendship::send_friend_request(&pool, &ana, bruno.id)
        .await
        .unwrap();

    let rejected = friendship::reject_request(&pool, &bruno, request.id())
        .await
        .unwrap();
    match rejected {
        Notification::Request { status, .. } => assert_eq!(status, RequestStatus::Rejected),
        other => panic!("expected a request, got {other:?}"),
    }

    assert!(!friendship::are_friends(&pool, ana.id, bruno.id).await.unwrap());

    // After the rejection a fresh request may be sent again
    friendship::send_friend_request(&pool, &ana, bruno.id)
        .await
        .unwrap();
}

#[tokio::test]
async fn unknown_or_plain_notification_is_not_a_request() {
    let pool = test_pool().await;
    let ana = create_customer(&pool, "Ana").await;

    let err = friendship::accept_request(&pool, &ana, 123_456)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // A plain notification id must not be acceptable
    let plain = notification::create_plain(&pool, ana.id, "Welcome!").await.unwrap();
    let err = friendship::accept_request(&pool, &ana, plain.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn remove_friend_is_symmetric() {
    let pool = test_pool().await;
    let ana = create_customer(&pool, "Ana").await;
    let bruno = create_customer(&pool, "Bruno").await;

    let request = friendship::send_friend_request(&pool, &ana, bruno.id)
        .await
        .unwrap();
    friendship::accept_request(&pool, &bruno, request.id())
        .await
        .unwrap();

    // Either side may remove the friendship
    friendship::remove_friend(&pool, &bruno, ana.id)
        .await
        .unwrap();
    assert!(!friendship::are_friends(&pool, ana.id, bruno.id).await.unwrap());

    // Removing again fails: they are no longer friends
    let err = friendship::remove_friend(&pool, &ana, bruno.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));
}

#[tokio::test]
async fn pending_listing_and_friend_listing() {
    let pool = test_pool().await;
    let ana = create_customer(&pool, "Ana").await;
    let bruno = create_customer(&pool, "Bruno").await;
    let carla = create_customer(&pool, "Carla").await;

    friendship::send_friend_request(&pool, &ana, bruno.id)
        .await
        .unwrap();
    let from_carla = friendship::send_friend_request(&pool, &carla, bruno.id)
        .await
        .unwrap();

    let pending = notification::find_pending_for(&pool, bruno.id).await.unwrap();
    assert_eq!(pending.len(), 2);

    friendship::accept_request(&pool, &bruno, from_carla.id())
        .await
        .unwrap();

    let pending = notification::find_pending_for(&pool, bruno.id).await.unwrap();
    assert_eq!(pending.len(), 1);

    let friends = friendship::list_friends(&pool, bruno.id).await.unwrap();
    assert_eq!(friends.len(), 1);
    assert_eq!(friends[0].id, carla.id);
}
