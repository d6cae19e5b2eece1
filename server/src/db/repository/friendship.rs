//! Friendship Repository
//!
//! All lookups normalize the pair so (A,B) and (B,A) hit the same row.

use super::{RepoError, RepoResult};
use shared::models::{Friend, Friendship};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

/// Normalize a pair to storage order (lower id first)
fn normalize(a: i64, b: i64) -> (i64, i64) {
    if a <= b { (a, b) } else { (b, a) }
}

pub async fn exists(pool: &SqlitePool, a: i64, b: i64) -> RepoResult<bool> {
    let (a, b) = normalize(a, b);
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM friendship WHERE user_a_id = ? AND user_b_id = ?",
    )
    .bind(a)
    .bind(b)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

pub async fn create(pool: &SqlitePool, a: i64, b: i64) -> RepoResult<Friendship> {
    if a == b {
        return Err(RepoError::Validation(
            "Cannot create a friendship with oneself".into(),
        ));
    }
    let (user_a, user_b) = normalize(a, b);
    let id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO friendship (id, user_a_id, user_b_id, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(id)
    .bind(user_a)
    .bind(user_b)
    .bind(now)
    .execute(pool)
    .await?;

    let friendship = sqlx::query_as::<_, Friendship>(
        "SELECT id, user_a_id, user_b_id, created_at FROM friendship WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    friendship.ok_or_else(|| RepoError::Database("Failed to create friendship".into()))
}

pub async fn delete(pool: &SqlitePool, a: i64, b: i64) -> RepoResult<bool> {
    let (a, b) = normalize(a, b);
    let rows = sqlx::query("DELETE FROM friendship WHERE user_a_id = ? AND user_b_id = ?")
        .bind(a)
        .bind(b)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Friends of a user, from both sides of the normalized pair
pub async fn find_friends_of(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<Friend>> {
    let friends = sqlx::query_as::<_, Friend>(
        "SELECT u.id, u.name, u.email, f.created_at AS since
         FROM friendship f
         JOIN user u ON u.id = CASE WHEN f.user_a_id = ?1 THEN f.user_b_id ELSE f.user_a_id END
         WHERE f.user_a_id = ?1 OR f.user_b_id = ?1
         ORDER BY u.name",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(friends)
}
