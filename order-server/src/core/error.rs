use shared::error::AppError;
use thiserror::Error;

/// 启动与运行期错误 (非请求级)
///
/// 请求处理器统一返回 [`AppError`]；这里只覆盖初始化、监听端口等。
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("数据库错误: {0}")]
    Database(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("内部服务器错误: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<surrealdb::Error> for ServerError {
    fn from(err: surrealdb::Error) -> Self {
        ServerError::Database(err.to_string())
    }
}

impl From<ServerError> for AppError {
    fn from(err: ServerError) -> Self {
        match err {
            ServerError::Config(msg) => {
                AppError::with_message(shared::ErrorCode::ConfigError, msg)
            }
            ServerError::Database(msg) => AppError::database(msg),
            other => AppError::internal(other.to_string()),
        }
    }
}

/// 启动流程的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
