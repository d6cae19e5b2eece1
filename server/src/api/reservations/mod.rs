//! Reservation API 模块

mod handler;

use axum::{Router, middleware, routing::get, routing::post};
use shared::types::UserRole;

use crate::auth::require_role;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/reservations", post(handler::create))
        .route("/api/reservations/{id}/cancel", post(handler::cancel))
        .route(
            "/api/reservations/{id}/participants",
            post(handler::add_participant),
        )
        .route("/api/me/reservations", get(handler::list_mine))
        .layer(middleware::from_fn(require_role(UserRole::Customer)))
}
