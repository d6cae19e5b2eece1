//! Registration and credential tests

mod common;

use common::{create_customer, test_pool};
use plateful_server::auth::credential;
use plateful_server::db::DbService;
use plateful_server::db::repository::{RepoError, user};
use shared::types::UserRole;

#[tokio::test]
async fn duplicate_email_hits_the_unique_index() {
    let pool = test_pool().await;

    user::create(&pool, "Ana", "ana@example.com", "+351910000001", "hash", UserRole::Customer)
        .await
        .unwrap();

    // Same email, different phone: the email index must reject it
    let err = user::create(&pool, "Ana 2", "ana@example.com", "+351910000002", "hash", UserRole::Customer)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));
}

#[tokio::test]
async fn duplicate_phone_hits_the_unique_index() {
    let pool = test_pool().await;

    user::create(&pool, "Ana", "ana@example.com", "+351910000001", "hash", UserRole::Customer)
        .await
        .unwrap();

    let err = user::create(&pool, "Bruno", "bruno@example.com", "+351910000001", "hash", UserRole::Customer)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));
}

#[tokio::test]
async fn role_is_fixed_at_registration() {
    let pool = test_pool().await;

    let business =
        user::create(&pool, "Bistro", "owner@bistro.test", "+351910000003", "hash", UserRole::Business)
            .await
            .unwrap();
    assert_eq!(business.role, UserRole::Business);

    let loaded = user::find_by_email(&pool, "owner@bistro.test")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded.role, UserRole::Business);
}

#[tokio::test]
async fn stored_hash_verifies_the_original_password_only() {
    let pool = test_pool().await;

    let hash = credential::hash_password("correct horse battery").unwrap();
    user::create(&pool, "Ana", "ana@example.com", "+351910000001", &hash, UserRole::Customer)
        .await
        .unwrap();

    let loaded = user::find_by_email(&pool, "ana@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(credential::verify_password("correct horse battery", &loaded.password_hash).unwrap());
    assert!(!credential::verify_password("wrong password", &loaded.password_hash).unwrap());
}

#[tokio::test]
async fn password_hash_never_serializes() {
    let pool = test_pool().await;
    create_customer(&pool, "Ana").await;

    let loaded = user::find_by_email(&pool, "ana@example.com")
        .await
        .unwrap()
        .unwrap();
    let json = serde_json::to_value(&loaded).unwrap();
    assert!(json.get("password_hash").is_none());
    assert_eq!(json["role"], "CUSTOMER");
}

#[tokio::test]
async fn file_backed_database_persists_across_reopens() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("plateful.db");
    let db_path = db_path.to_string_lossy();

    {
        let db = DbService::new(&db_path).await.unwrap();
        user::create(&db.pool, "Ana", "ana@example.com", "+351910000001", "hash", UserRole::Customer)
            .await
            .unwrap();
        db.pool.close().await;
    }

    // Reopen: migrations are idempotent and the row is still there
    let db = DbService::new(&db_path).await.unwrap();
    let loaded = user::find_by_email(&db.pool, "ana@example.com")
        .await
        .unwrap();
    assert!(loaded.is_some());
}
