//! Order Server - 销售订单管理后端
//!
//! # 架构概述
//!
//! - **订单** (`orders`): 校验、金额推导、生命周期钩子、部门工作清单、批量导入/导出
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **实时推送** (`live`): Socket.IO 房间广播 + 数据库变更流
//! - **邮件** (`mail`): 订单确认与发货通知
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! order-server/src/
//! ├── core/          # 配置、状态、错误、服务器组装
//! ├── auth/          # JWT 认证、密码
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层
//! ├── orders/        # 订单领域逻辑
//! ├── live/          # 实时推送
//! ├── mail/          # 邮件
//! ├── spreadsheet/   # xlsx 读写
//! └── utils/         # 日志、校验
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod live;
pub mod mail;
pub mod orders;
pub mod spreadsheet;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState, build_app};
pub use orders::OrderLifecycle;
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro
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

/// 启动前准备: 读取 `.env`，初始化日志
pub fn setup_environment() -> Result<Config, Box<dyn std::error::Error>> {
    if let Err(e) = dotenv::dotenv() {
        eprintln!("No .env loaded ({e}), using process environment");
    }

    let config = Config::from_env();
    init_logger_with_file(
        config.log_level.as_deref(),
        config.log_json,
        config.log_dir.as_deref(),
    );
    config.ensure_work_dir_structure()?;
    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
   ____           __
  / __ \_________/ /__  __________
 / / / / ___/ __  / _ \/ ___/ ___/
/ /_/ / /  / /_/ /  __/ /  (__  )
\____/_/   \__,_/\___/_/  /____/
    "#
    );
}
