//! Community Model

use serde::{Deserialize, Serialize};

use crate::models::member::MemberWithUser;
use crate::types::{CommunityType, CommunityVisibility};

/// Community entity; the name is unique case-insensitively
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Community {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub visibility: CommunityVisibility,
    pub community_type: CommunityType,
    pub created_at: i64,
}

/// Create community payload. `community_type` is derived from the
/// creator's role, never accepted from the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunityCreate {
    pub name: String,
    pub description: Option<String>,
    pub visibility: CommunityVisibility,
}

/// Community with its member list (detail view)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunityDetail {
    #[serde(flatten)]
    pub community: Community,
    pub members: Vec<MemberWithUser>,
}
