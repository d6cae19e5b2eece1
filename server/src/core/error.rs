//! Server-level errors

use thiserror::Error;

use crate::utils::AppError;

/// Errors raised while starting or running the HTTP server
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    App(#[from] AppError),
}

/// Result type for server startup/shutdown paths
pub type Result<T> = std::result::Result<T, ServerError>;
