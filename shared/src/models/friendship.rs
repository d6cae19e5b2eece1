//! Friendship Model

use serde::{Deserialize, Serialize};

/// Undirected friendship between two customers
///
/// Stored in normalized order: `user_a_id < user_b_id`, so (A,B) and (B,A)
/// map to the same row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Friendship {
    pub id: i64,
    pub user_a_id: i64,
    pub user_b_id: i64,
    pub created_at: i64,
}

/// One side of a friendship, as listed for a given user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Friend {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub since: i64,
}
