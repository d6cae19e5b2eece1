//! Plateful Server - 餐厅预订与社交社区后端
//!
//! # 架构概述
//!
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **数据库** (`db`): 嵌入式 SQLite 存储 (sqlx)
//! - **领域服务** (`services`): 预订分配、好友状态机、社区授权
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、密码哈希、中间件
//! ├── db/            # 连接池、迁移、仓储层
//! ├── services/      # 领域服务
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 错误、校验、日志
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use db::DbService;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment(config: &Config) {
    let logs_dir = config.logs_dir();
    let logs_dir = logs_dir.to_str();
    init_logger_with_file(Some(&config.log_level), logs_dir);
}

pub fn print_banner() {
    println!(
        r#"
    ____  __      __       ____      __
   / __ \/ /___ _/ /____  / __/_  __/ /
  / /_/ / / __ `/ __/ _ \/ /_/ / / / /
 / ____/ / /_/ / /_/  __/ __/ /_/ / /
/_/   /_/\__,_/\__/\___/_/  \__,_/_/
    "#
    );
}
