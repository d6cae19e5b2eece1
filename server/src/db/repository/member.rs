//! Member Repository

use super::{RepoError, RepoResult};
use shared::models::{Member, MemberWithUser};
use shared::types::MemberRole;
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const MEMBER_SELECT: &str =
    "SELECT id, community_id, user_id, member_role, joined_at FROM member";

const MEMBER_WITH_USER_SELECT: &str = "SELECT m.id, m.community_id, m.user_id, \
     u.name AS user_name, m.member_role, m.joined_at \
     FROM member m JOIN user u ON u.id = m.user_id";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Member>> {
    let member = sqlx::query_as::<_, Member>(&format!("{MEMBER_SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(member)
}

pub async fn find_by_user_and_community(
    pool: &SqlitePool,
    user_id: i64,
    community_id: i64,
) -> RepoResult<Option<Member>> {
    let member = sqlx::query_as::<_, Member>(&format!(
        "{MEMBER_SELECT} WHERE user_id = ? AND community_id = ? LIMIT 1"
    ))
    .bind(user_id)
    .bind(community_id)
    .fetch_optional(pool)
    .await?;
    Ok(member)
}

pub async fn find_by_community(
    pool: &SqlitePool,
    community_id: i64,
) -> RepoResult<Vec<MemberWithUser>> {
    let members = sqlx::query_as::<_, MemberWithUser>(&format!(
        "{MEMBER_WITH_USER_SELECT} WHERE m.community_id = ? ORDER BY m.joined_at"
    ))
    .bind(community_id)
    .fetch_all(pool)
    .await?;
    Ok(members)
}

pub async fn create(
    pool: &SqlitePool,
    community_id: i64,
    user_id: i64,
    role: MemberRole,
) -> RepoResult<Member> {
    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO member (id, community_id, user_id, member_role, joined_at)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(community_id)
    .bind(user_id)
    .bind(role)
    .bind(now_millis())
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create member".into()))
}

pub async fn update_role(pool: &SqlitePool, id: i64, role: MemberRole) -> RepoResult<Member> {
    let rows = sqlx::query("UPDATE member SET member_role = ? WHERE id = ?")
        .bind(role)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Member {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Member {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM member WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
