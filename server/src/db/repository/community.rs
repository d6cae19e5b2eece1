//! Community Repository

use super::{RepoError, RepoResult};
use shared::models::{Community, CommunityCreate};
use shared::types::CommunityType;
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const COMMUNITY_SELECT: &str = "SELECT id, name, description, image_url, visibility, \
     community_type, created_at FROM community";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Community>> {
    let communities =
        sqlx::query_as::<_, Community>(&format!("{COMMUNITY_SELECT} ORDER BY name"))
            .fetch_all(pool)
            .await?;
    Ok(communities)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Community>> {
    let community = sqlx::query_as::<_, Community>(&format!("{COMMUNITY_SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(community)
}

/// Case-insensitive name lookup (the name column is COLLATE NOCASE)
pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<Community>> {
    let community =
        sqlx::query_as::<_, Community>(&format!("{COMMUNITY_SELECT} WHERE name = ? LIMIT 1"))
            .bind(name)
            .fetch_optional(pool)
            .await?;
    Ok(community)
}

pub async fn create(
    pool: &SqlitePool,
    data: CommunityCreate,
    community_type: CommunityType,
) -> RepoResult<Community> {
    let id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO community (id, name, description, image_url, visibility, community_type, created_at)
         VALUES (?, ?, ?, NULL, ?, ?, ?)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.visibility)
    .bind(community_type)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create community".into()))
}

pub async fn set_image_url(pool: &SqlitePool, id: i64, image_url: &str) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE community SET image_url = ? WHERE id = ?")
        .bind(image_url)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Community {id} not found")));
    }
    Ok(())
}
