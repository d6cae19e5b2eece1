//! Notification API 模块

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/me/notifications", get(handler::list_mine))
        .route("/api/notifications/{id}/read", post(handler::mark_read))
}
