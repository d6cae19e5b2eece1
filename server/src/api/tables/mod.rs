//! Dining Table API 模块

mod handler;

use axum::{Router, middleware, routing::delete};
use shared::types::UserRole;

use crate::auth::require_role;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tables", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{id}", delete(handler::delete))
        .layer(middleware::from_fn(require_role(UserRole::Business)))
}
