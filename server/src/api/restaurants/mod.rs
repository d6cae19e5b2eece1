//! Restaurant API 模块

mod handler;

pub(crate) use handler::require_owned_restaurant;

use axum::{Router, middleware, routing::get, routing::post, routing::put};
use shared::types::UserRole;

use crate::auth::require_role;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/restaurants", routes())
}

fn routes() -> Router<ServerState> {
    // Anonymous reads; the auth middleware lets GET /api/restaurants/* through
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/tables", get(handler::list_tables))
        .route("/{id}/timeslots", get(handler::list_timeslots))
        .route("/{id}/menu-items", get(handler::list_menu_items));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .route("/{id}/tables", post(handler::create_table))
        .route("/{id}/timeslots", post(handler::create_timeslot))
        .route("/{id}/menu-items", post(handler::create_menu_item))
        .layer(middleware::from_fn(require_role(UserRole::Business)));

    read_routes.merge(manage_routes)
}
