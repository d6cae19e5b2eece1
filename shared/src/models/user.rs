//! User Model

use serde::{Deserialize, Serialize};

use crate::types::UserRole;

/// User entity. Customers, businesses and admins share one table and one
/// id space, discriminated by `role`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: i64,
}
