//! Community membership and post authorization tests

mod common;

use common::{create_business, create_customer, test_pool};
use plateful_server::AppError;
use plateful_server::auth::CurrentUser;
use plateful_server::services::community;
use shared::models::{CommunityCreate, PostCreate, PostUpdate};
use shared::types::{CommunityType, CommunityVisibility, MemberRole};
use sqlx::SqlitePool;

fn community_payload(name: &str, visibility: CommunityVisibility) -> CommunityCreate {
    CommunityCreate {
        name: name.to_string(),
        description: Some("A place to talk food".to_string()),
        visibility,
    }
}

fn post_payload(title: &str) -> PostCreate {
    PostCreate {
        title: title.to_string(),
        description: None,
        kind: None,
        reservation_id: None,
    }
}

async fn create_public_community(
    pool: &SqlitePool,
    owner: &CurrentUser,
    name: &str,
) -> shared::models::Community {
    community::create_community(pool, owner, community_payload(name, CommunityVisibility::Public))
        .await
        .unwrap()
}

#[tokio::test]
async fn community_names_are_unique_case_insensitively() {
    let pool = test_pool().await;
    let ana = create_customer(&pool, "Ana").await;
    let bruno = create_customer(&pool, "Bruno").await;

    create_public_community(&pool, &ana, "Foo").await;

    // Different creator, different casing: still a duplicate
    let err = community::create_community(
        &pool,
        &bruno,
        community_payload("foo", CommunityVisibility::Public),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn creator_becomes_owner_and_type_follows_role() {
    let pool = test_pool().await;
    let ana = create_customer(&pool, "Ana").await;
    let bistro = create_business(&pool, "Bistro").await;

    let user_community = create_public_community(&pool, &ana, "Food Lovers").await;
    assert_eq!(user_community.community_type, CommunityType::User);

    let restaurant_community = create_public_community(&pool, &bistro, "Bistro Fans").await;
    assert_eq!(restaurant_community.community_type, CommunityType::Restaurant);

    let detail = community::get_community(&pool, user_community.id).await.unwrap();
    assert_eq!(detail.members.len(), 1);
    assert_eq!(detail.members[0].user_id, ana.id);
    assert_eq!(detail.members[0].member_role, MemberRole::Owner);
}

#[tokio::test]
async fn private_communities_cannot_be_joined_directly() {
    let pool = test_pool().await;
    let ana = create_customer(&pool, "Ana").await;
    let bruno = create_customer(&pool, "Bruno").await;

    let private = community::create_community(
        &pool,
        &ana,
        community_payload("Secret Supper", CommunityVisibility::Private),
    )
    .await
    .unwrap();

    let err = community::join_community(&pool, &bruno, private.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));
}

#[tokio::test]
async fn joining_twice_is_a_conflict() {
    let pool = test_pool().await;
    let ana = create_customer(&pool, "Ana").await;
    let bruno = create_customer(&pool, "Bruno").await;

    let public = create_public_community(&pool, &ana, "Food Lovers").await;

    let member = community::join_community(&pool, &bruno, public.id)
        .await
        .unwrap();
    assert_eq!(member.member_role, MemberRole::Participant);

    let err = community::join_community(&pool, &bruno, public.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn the_owner_can_never_be_removed() {
    let pool = test_pool().await;
    let ana = create_customer(&pool, "Ana").await;
    let bruno = create_customer(&pool, "Bruno").await;

    let public = create_public_community(&pool, &ana, "Food Lovers").await;
    community::join_community(&pool, &bruno, public.id)
        .await
        .unwrap();

    // Not by another member, not even by the owner herself
    let err = community::remove_member(&pool, &bruno, public.id, ana.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));

    let err = community::remove_member(&pool, &ana, public.id, ana.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));
}

#[tokio::test]
async fn member_removal_rules() {
    let pool = test_pool().await;
    let ana = create_customer(&pool, "Ana").await;
    let bruno = create_customer(&pool, "Bruno").await;
    let carla = create_customer(&pool, "Carla").await;

    let public = create_public_community(&pool, &ana, "Food Lovers").await;
    community::join_community(&pool, &bruno, public.id)
        .await
        .unwrap();
    community::join_community(&pool, &carla, public.id)
        .await
        .unwrap();

    // A participant cannot remove someone else
    let err = community::remove_member(&pool, &bruno, public.id, carla.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    // Self-removal is always allowed
    community::remove_member(&pool, &bruno, public.id, bruno.id)
        .await
        .unwrap();

    // The owner may remove any other member
    community::remove_member(&pool, &ana, public.id, carla.id)
        .await
        .unwrap();

    let detail = community::get_community(&pool, public.id).await.unwrap();
    assert_eq!(detail.members.len(), 1);
}

#[tokio::test]
async fn post_creation_requires_a_moderator_role() {
    let pool = test_pool().await;
    let ana = create_customer(&pool, "Ana").await;
    let bruno = create_customer(&pool, "Bruno").await;
    let carla = create_customer(&pool, "Carla").await;

    let public = create_public_community(&pool, &ana, "Food Lovers").await;
    community::join_community(&pool, &bruno, public.id)
        .await
        .unwrap();

    // Non-member
    let err = community::create_post(&pool, &carla, public.id, post_payload("Hello"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    // Participant
    let err = community::create_post(&pool, &bruno, public.id, post_payload("Hello"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    // Owner
    community::create_post(&pool, &ana, public.id, post_payload("Welcome!"))
        .await
        .unwrap();

    // Promoted admin
    community::update_member_role(&pool, &ana, public.id, bruno.id, MemberRole::Admin)
        .await
        .unwrap();
    community::create_post(&pool, &bruno, public.id, post_payload("Second post"))
        .await
        .unwrap();
}

#[tokio::test]
async fn authors_keep_write_access_after_demotion() {
    let pool = test_pool().await;
    let ana = create_customer(&pool, "Ana").await;
    let bruno = create_customer(&pool, "Bruno").await;
    let carla = create_customer(&pool, "Carla").await;

    let public = create_public_community(&pool, &ana, "Food Lovers").await;
    community::join_community(&pool, &bruno, public.id)
        .await
        .unwrap();
    community::join_community(&pool, &carla, public.id)
        .await
        .unwrap();

    community::update_member_role(&pool, &ana, public.id, bruno.id, MemberRole::Admin)
        .await
        .unwrap();
    let post = community::create_post(&pool, &bruno, public.id, post_payload("My review"))
        .await
        .unwrap();

    // Demote the author back to participant
    community::update_member_role(&pool, &ana, public.id, bruno.id, MemberRole::Participant)
        .await
        .unwrap();

    // The author may still edit their own post
    let updated = community::update_post(
        &pool,
        &bruno,
        post.id,
        PostUpdate {
            title: Some("My updated review".to_string()),
            description: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.title, "My updated review");

    // Another participant may not
    let err = community::update_post(
        &pool,
        &carla,
        post.id,
        PostUpdate {
            title: Some("Hijacked".to_string()),
            description: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    // Moderators can delete any post; the author can delete their own
    community::delete_post(&pool, &bruno, post.id).await.unwrap();
}

#[tokio::test]
async fn private_posts_are_member_only() {
    let pool = test_pool().await;
    let ana = create_customer(&pool, "Ana").await;
    let bruno = create_customer(&pool, "Bruno").await;

    let private = community::create_community(
        &pool,
        &ana,
        community_payload("Secret Supper", CommunityVisibility::Private),
    )
    .await
    .unwrap();
    community::create_post(&pool, &ana, private.id, post_payload("Members only"))
        .await
        .unwrap();

    // Anonymous readers are unauthenticated
    let err = community::list_posts(&pool, None, private.id).await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized));

    // Authenticated non-members are forbidden
    let err = community::list_posts(&pool, Some(&bruno), private.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    // Members read fine
    let posts = community::list_posts(&pool, Some(&ana), private.id)
        .await
        .unwrap();
    assert_eq!(posts.len(), 1);
}

#[tokio::test]
async fn public_posts_are_readable_anonymously() {
    let pool = test_pool().await;
    let ana = create_customer(&pool, "Ana").await;

    let public = create_public_community(&pool, &ana, "Food Lovers").await;
    let post = community::create_post(&pool, &ana, public.id, post_payload("Open to all"))
        .await
        .unwrap();

    let posts = community::list_posts(&pool, None, public.id).await.unwrap();
    assert_eq!(posts.len(), 1);

    let fetched = community::get_post(&pool, None, post.id).await.unwrap();
    assert_eq!(fetched.title, "Open to all");
    assert_eq!(fetched.author_name, "Ana");
}

#[tokio::test]
async fn role_updates_are_owner_only_and_never_touch_ownership() {
    let pool = test_pool().await;
    let ana = create_customer(&pool, "Ana").await;
    let bruno = create_customer(&pool, "Bruno").await;
    let carla = create_customer(&pool, "Carla").await;

    let public = create_public_community(&pool, &ana, "Food Lovers").await;
    community::join_community(&pool, &bruno, public.id)
        .await
        .unwrap();
    community::join_community(&pool, &carla, public.id)
        .await
        .unwrap();

    // Non-owner cannot promote
    let err =
        community::update_member_role(&pool, &bruno, public.id, carla.id, MemberRole::Admin)
            .await
            .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    // The owner's own role is fixed
    let err = community::update_member_role(&pool, &ana, public.id, ana.id, MemberRole::Admin)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));

    // Ownership cannot be granted
    let err = community::update_member_role(&pool, &ana, public.id, bruno.id, MemberRole::Owner)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}
