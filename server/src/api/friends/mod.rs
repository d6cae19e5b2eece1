//! Friends & Friend Request API 模块

mod handler;

use axum::{Router, middleware, routing::delete, routing::get, routing::post};
use shared::types::UserRole;

use crate::auth::require_role;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/users/{id}/requests", post(handler::send_request))
        .route("/api/requests/{id}/accept", post(handler::accept))
        .route("/api/requests/{id}/reject", post(handler::reject))
        .route("/api/me/requests", get(handler::list_pending))
        .route("/api/me/friends", get(handler::list_friends))
        .route("/api/friends/{id}", delete(handler::remove_friend))
        .layer(middleware::from_fn(require_role(UserRole::Customer)))
}
