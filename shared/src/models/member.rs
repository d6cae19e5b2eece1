//! Member Model

use serde::{Deserialize, Serialize};

use crate::types::MemberRole;

/// Membership of one user in one community
///
/// Exactly one OWNER exists per community, assigned at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Member {
    pub id: i64,
    pub community_id: i64,
    pub user_id: i64,
    pub member_role: MemberRole,
    pub joined_at: i64,
}

/// Member with user info (for list/detail views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MemberWithUser {
    pub id: i64,
    pub community_id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub member_role: MemberRole,
    pub joined_at: i64,
}
