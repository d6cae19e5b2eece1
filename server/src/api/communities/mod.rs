//! Community API 模块

mod handler;

use axum::{Router, routing::get, routing::post, routing::put};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/communities", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/members", post(handler::join))
        .route(
            "/{id}/members/{user_id}",
            put(handler::update_member_role).delete(handler::remove_member),
        )
        .route("/{id}/image", post(handler::upload_image))
        .route("/{id}/posts", get(handler::list_posts).post(handler::create_post))
}
