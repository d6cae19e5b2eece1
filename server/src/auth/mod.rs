//! 认证模块 - JWT + Argon2 认证体系
//!
//! # 模块结构
//!
//! - [`jwt`] - JWT 令牌服务与 [`CurrentUser`]
//! - [`credential`] - 密码哈希 (argon2)
//! - [`middleware`] - 认证与角色中间件
//! - [`extractor`] - Axum 提取器

pub mod credential;
pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use extractor::OptionalUser;
pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_role};
