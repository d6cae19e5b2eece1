//! Repository Module
//!
//! One module per entity; free functions over `&SqlitePool` that map
//! directly to SQL. Check-then-insert paths are best-effort; the UNIQUE
//! indexes in the schema are the actual safety net, and violations surface
//! as [`RepoError::Duplicate`].

// Accounts
pub mod user;

// Restaurant domain
pub mod dining_table;
pub mod menu_item;
pub mod reservation;
pub mod restaurant;
pub mod time_slot;

// Social domain
pub mod community;
pub mod friendship;
pub mod member;
pub mod notification;
pub mod post;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err
            && db_err.is_unique_violation()
        {
            return RepoError::Duplicate(db_err.message().to_string());
        }
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
