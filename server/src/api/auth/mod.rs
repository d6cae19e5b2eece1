//! Auth API 模块

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/register/customer", post(handler::register_customer))
        .route("/register/business", post(handler::register_business))
        .route("/login", post(handler::login))
        .route("/me", get(handler::me))
}
