//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 注册/登录接口
//! - [`restaurants`] - 餐厅管理接口 (含桌台/时段/菜单的嵌套创建)
//! - [`tables`] - 桌台删除接口
//! - [`timeslots`] - 时段删除接口
//! - [`menu_items`] - 菜单删除接口
//! - [`reservations`] - 预订接口
//! - [`friends`] - 好友与好友请求接口
//! - [`communities`] - 社区与成员接口
//! - [`posts`] - 社区帖子接口
//! - [`notifications`] - 通知接口

pub mod auth;
pub mod health;

// Restaurant domain
pub mod menu_items;
pub mod reservations;
pub mod restaurants;
pub mod tables;
pub mod timeslots;

// Social domain
pub mod communities;
pub mod friends;
pub mod notifications;
pub mod posts;

use axum::Router;

use crate::core::ServerState;

/// Compose all resource routers
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(restaurants::router())
        .merge(tables::router())
        .merge(timeslots::router())
        .merge(menu_items::router())
        .merge(reservations::router())
        .merge(friends::router())
        .merge(communities::router())
        .merge(posts::router())
        .merge(notifications::router())
}
