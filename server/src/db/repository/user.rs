//! User Repository

use super::{RepoError, RepoResult};
use shared::models::User;
use shared::types::UserRole;
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const USER_SELECT: &str =
    "SELECT id, name, email, phone, password_hash, role, created_at FROM user";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("{USER_SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("{USER_SELECT} WHERE email = ? LIMIT 1"))
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_by_phone(pool: &SqlitePool, phone: &str) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("{USER_SELECT} WHERE phone = ? LIMIT 1"))
        .bind(phone)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Insert a new account. The UNIQUE indexes on email/phone are the final
/// arbiter for duplicates; callers pre-check only to produce friendlier
/// messages.
pub async fn create(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    phone: &str,
    password_hash: &str,
    role: UserRole,
) -> RepoResult<User> {
    let id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO user (id, name, email, phone, password_hash, role, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(password_hash)
    .bind(role)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}
