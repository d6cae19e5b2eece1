//! Community membership and post authorization
//!
//! One OWNER per community, assigned at creation. Post write access is
//! role-based (OWNER/ADMIN), widened to the author for update/delete.
//! Reads of a private community's posts require membership; public
//! communities are readable anonymously.

use sqlx::SqlitePool;

use crate::auth::CurrentUser;
use crate::db::repository::{community, member, post, reservation};
use crate::utils::{AppError, AppResult};
use shared::models::{
    Community, CommunityCreate, CommunityDetail, Member, PostCreate, PostUpdate, PostWithAuthor,
};
use shared::types::{CommunityType, CommunityVisibility, MemberRole, PostKind, UserRole};

/// Create a community; the creator becomes its single OWNER and the
/// community type is derived from the creator's role
pub async fn create_community(
    pool: &SqlitePool,
    creator: &CurrentUser,
    data: CommunityCreate,
) -> AppResult<Community> {
    if community::find_by_name(pool, &data.name).await?.is_some() {
        return Err(AppError::conflict(format!(
            "A community named '{}' already exists",
            data.name
        )));
    }

    let community_type = match creator.role {
        UserRole::Business => CommunityType::Restaurant,
        UserRole::Customer | UserRole::Admin => CommunityType::User,
    };

    let created = community::create(pool, data, community_type).await?;
    member::create(pool, created.id, creator.id, MemberRole::Owner).await?;

    tracing::info!(
        community_id = created.id,
        creator_id = creator.id,
        "Community created"
    );

    Ok(created)
}

pub async fn get_community(pool: &SqlitePool, community_id: i64) -> AppResult<CommunityDetail> {
    let community = community::find_by_id(pool, community_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Community {community_id} not found")))?;
    let members = member::find_by_community(pool, community_id).await?;
    Ok(CommunityDetail { community, members })
}

/// Direct join, only for public communities
pub async fn join_community(
    pool: &SqlitePool,
    user: &CurrentUser,
    community_id: i64,
) -> AppResult<Member> {
    let community = community::find_by_id(pool, community_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Community {community_id} not found")))?;

    if community.visibility == CommunityVisibility::Private {
        // Private communities would need an invite flow, which does not
        // exist yet
        return Err(AppError::business_rule(
            "Private communities cannot be joined directly",
        ));
    }

    if member::find_by_user_and_community(pool, user.id, community_id)
        .await?
        .is_some()
    {
        return Err(AppError::conflict(
            "You are already a member of this community",
        ));
    }

    let created = member::create(pool, community_id, user.id, MemberRole::Participant).await?;
    tracing::info!(community_id, user_id = user.id, "Member joined community");
    Ok(created)
}

/// Remove a member. Self-removal is always allowed, removing someone else
/// requires OWNER, and the OWNER can never be removed by anyone.
pub async fn remove_member(
    pool: &SqlitePool,
    actor: &CurrentUser,
    community_id: i64,
    user_id: i64,
) -> AppResult<()> {
    community::find_by_id(pool, community_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Community {community_id} not found")))?;

    let target = member::find_by_user_and_community(pool, user_id, community_id)
        .await?
        .ok_or_else(|| AppError::not_found("User is not a member of this community"))?;

    if target.member_role == MemberRole::Owner {
        return Err(AppError::business_rule(
            "The owner cannot be removed from a community",
        ));
    }

    if actor.id != user_id {
        let actor_member = member::find_by_user_and_community(pool, actor.id, community_id)
            .await?
            .ok_or_else(|| AppError::forbidden("You are not a member of this community"))?;
        if actor_member.member_role != MemberRole::Owner {
            return Err(AppError::forbidden(
                "Only the owner can remove other members",
            ));
        }
    }

    member::delete(pool, target.id).await?;
    tracing::info!(community_id, removed_user_id = user_id, actor_id = actor.id, "Member removed");
    Ok(())
}

/// Change a member's role. OWNER only; the owner's own role is fixed and
/// ownership cannot be handed out.
pub async fn update_member_role(
    pool: &SqlitePool,
    actor: &CurrentUser,
    community_id: i64,
    user_id: i64,
    new_role: MemberRole,
) -> AppResult<Member> {
    community::find_by_id(pool, community_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Community {community_id} not found")))?;

    let actor_member = require_member(pool, actor, community_id).await?;
    if actor_member.member_role != MemberRole::Owner {
        return Err(AppError::forbidden("Only the owner can change member roles"));
    }

    let target = member::find_by_user_and_community(pool, user_id, community_id)
        .await?
        .ok_or_else(|| AppError::not_found("User is not a member of this community"))?;

    if target.member_role == MemberRole::Owner {
        return Err(AppError::business_rule("The owner's role cannot be changed"));
    }
    if new_role == MemberRole::Owner {
        return Err(AppError::validation(
            "Ownership cannot be transferred to another member",
        ));
    }

    let updated = member::update_role(pool, target.id, new_role).await?;
    tracing::info!(
        community_id,
        member_id = target.id,
        new_role = ?new_role,
        "Member role updated"
    );
    Ok(updated)
}

/// Membership guard for reads of a private community's content
async fn check_read_access(
    pool: &SqlitePool,
    viewer: Option<&CurrentUser>,
    community: &Community,
) -> AppResult<()> {
    if community.visibility == CommunityVisibility::Public {
        return Ok(());
    }
    let viewer = viewer.ok_or(AppError::Unauthorized)?;
    member::find_by_user_and_community(pool, viewer.id, community.id)
        .await?
        .ok_or_else(|| AppError::forbidden("Only members can view this community's posts"))?;
    Ok(())
}

/// Load the actor's membership, failing with 403 for non-members
async fn require_member(
    pool: &SqlitePool,
    actor: &CurrentUser,
    community_id: i64,
) -> AppResult<Member> {
    member::find_by_user_and_community(pool, actor.id, community_id)
        .await?
        .ok_or_else(|| AppError::forbidden("You are not a member of this community"))
}

/// Publish a post; OWNER/ADMIN only
pub async fn create_post(
    pool: &SqlitePool,
    actor: &CurrentUser,
    community_id: i64,
    mut data: PostCreate,
) -> AppResult<PostWithAuthor> {
    community::find_by_id(pool, community_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Community {community_id} not found")))?;

    let actor_member = require_member(pool, actor, community_id).await?;
    if !actor_member.member_role.can_moderate() {
        return Err(AppError::forbidden(
            "Only owners and admins can publish posts",
        ));
    }

    if let Some(reservation_id) = data.reservation_id {
        reservation::find_by_id(pool, reservation_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Reservation {reservation_id} not found"))
            })?;
        // A linked reservation makes this an open-reservation post
        data.kind.get_or_insert(PostKind::OpenReservation);
    }

    let created = post::create(pool, community_id, actor_member.id, data).await?;
    tracing::info!(
        post_id = created.id,
        community_id,
        author_member_id = actor_member.id,
        "Post published"
    );
    Ok(created)
}

/// Posts of a community, respecting private-community read access
pub async fn list_posts(
    pool: &SqlitePool,
    viewer: Option<&CurrentUser>,
    community_id: i64,
) -> AppResult<Vec<PostWithAuthor>> {
    let community = community::find_by_id(pool, community_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Community {community_id} not found")))?;
    check_read_access(pool, viewer, &community).await?;
    Ok(post::find_by_community(pool, community_id).await?)
}

/// Single post, respecting private-community read access
pub async fn get_post(
    pool: &SqlitePool,
    viewer: Option<&CurrentUser>,
    post_id: i64,
) -> AppResult<PostWithAuthor> {
    let post = post::find_by_id(pool, post_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Post {post_id} not found")))?;
    let community = community::find_by_id(pool, post.community_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Community {} not found", post.community_id)))?;
    check_read_access(pool, viewer, &community).await?;
    Ok(post)
}

/// Moderators may edit any post, authors their own
async fn check_write_access(
    pool: &SqlitePool,
    actor: &CurrentUser,
    post: &PostWithAuthor,
) -> AppResult<()> {
    let actor_member = require_member(pool, actor, post.community_id).await?;
    if actor_member.member_role.can_moderate() || actor_member.id == post.author_member_id {
        return Ok(());
    }
    Err(AppError::forbidden(
        "Only owners, admins or the author can modify a post",
    ))
}

pub async fn update_post(
    pool: &SqlitePool,
    actor: &CurrentUser,
    post_id: i64,
    data: PostUpdate,
) -> AppResult<PostWithAuthor> {
    let post = post::find_by_id(pool, post_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Post {post_id} not found")))?;
    check_write_access(pool, actor, &post).await?;
    Ok(post::update(pool, post_id, data).await?)
}

pub async fn delete_post(pool: &SqlitePool, actor: &CurrentUser, post_id: i64) -> AppResult<()> {
    let post = post::find_by_id(pool, post_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Post {post_id} not found")))?;
    check_write_access(pool, actor, &post).await?;
    post::delete(pool, post_id).await?;
    tracing::info!(post_id, actor_id = actor.id, "Post deleted");
    Ok(())
}

/// Image upload authorization: OWNER/ADMIN of the community
pub async fn check_image_access(
    pool: &SqlitePool,
    actor: &CurrentUser,
    community_id: i64,
) -> AppResult<Community> {
    let community = community::find_by_id(pool, community_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Community {community_id} not found")))?;
    let actor_member = require_member(pool, actor, community_id).await?;
    if !actor_member.member_role.can_moderate() {
        return Err(AppError::forbidden(
            "Only owners and admins can change the community image",
        ));
    }
    Ok(community)
}
