//! Community Post Model

use serde::{Deserialize, Serialize};

use crate::types::PostKind;

/// Post inside a community, joined with its author
///
/// Authorship is scoped to membership: `author_member_id` references the
/// member record, not the bare user. An OPEN_RESERVATION post additionally
/// links the reservation it advertises.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PostWithAuthor {
    pub id: i64,
    pub community_id: i64,
    pub author_member_id: i64,
    pub author_user_id: i64,
    pub author_name: String,
    pub title: String,
    pub description: Option<String>,
    pub kind: PostKind,
    pub reservation_id: Option<i64>,
    pub published_at: i64,
    pub updated_at: i64,
}

/// Create post payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostCreate {
    pub title: String,
    pub description: Option<String>,
    /// GENERAL when omitted
    #[serde(default)]
    pub kind: Option<PostKind>,
    pub reservation_id: Option<i64>,
}

/// Update post payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
}
