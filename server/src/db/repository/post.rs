//! Community Post Repository

use super::{RepoError, RepoResult};
use shared::models::{PostCreate, PostUpdate, PostWithAuthor};
use shared::types::PostKind;
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const POST_SELECT: &str = "SELECT p.id, p.community_id, p.author_member_id, \
     m.user_id AS author_user_id, u.name AS author_name, p.title, p.description, \
     p.kind, p.reservation_id, p.published_at, p.updated_at \
     FROM community_post p \
     JOIN member m ON m.id = p.author_member_id \
     JOIN user u ON u.id = m.user_id";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<PostWithAuthor>> {
    let post = sqlx::query_as::<_, PostWithAuthor>(&format!("{POST_SELECT} WHERE p.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(post)
}

pub async fn find_by_community(
    pool: &SqlitePool,
    community_id: i64,
) -> RepoResult<Vec<PostWithAuthor>> {
    let posts = sqlx::query_as::<_, PostWithAuthor>(&format!(
        "{POST_SELECT} WHERE p.community_id = ? ORDER BY p.published_at DESC"
    ))
    .bind(community_id)
    .fetch_all(pool)
    .await?;
    Ok(posts)
}

pub async fn create(
    pool: &SqlitePool,
    community_id: i64,
    author_member_id: i64,
    data: PostCreate,
) -> RepoResult<PostWithAuthor> {
    let id = snowflake_id();
    let now = now_millis();
    let kind = data.kind.unwrap_or(PostKind::General);
    sqlx::query(
        "INSERT INTO community_post
            (id, community_id, author_member_id, title, description, kind, reservation_id,
             published_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(community_id)
    .bind(author_member_id)
    .bind(&data.title)
    .bind(&data.description)
    .bind(kind)
    .bind(data.reservation_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create post".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: PostUpdate) -> RepoResult<PostWithAuthor> {
    let rows = sqlx::query(
        "UPDATE community_post SET
            title = COALESCE(?1, title),
            description = COALESCE(?2, description),
            updated_at = ?3
         WHERE id = ?4",
    )
    .bind(&data.title)
    .bind(&data.description)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Post {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Post {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM community_post WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
