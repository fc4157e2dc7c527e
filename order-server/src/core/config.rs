use std::path::PathBuf;

use crate::auth::JwtConfig;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖 (启动时先加载 `.env`)：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (数据库、日志) |
/// | HTTP_PORT | 4000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | APP_URL | http://localhost:3000 | 前端地址 (CORS) |
/// | ORDER_CODE_PREFIX | PMTO | 订单编号前缀 |
/// | DB_NAMESPACE | sales | SurrealDB namespace |
/// | DB_NAME | orders | SurrealDB database |
/// | MAIL_RELAY_URL | (空) | HTTP 邮件中继；为空时只记录日志 |
/// | MAIL_FROM | orders@promarktech.local | 发件人 |
/// | MAIL_SIGNATURE | Promark Tech Solutions | 邮件署名 |
/// | LOG_LEVEL | order_server=info,tower_http=info | 日志过滤 |
/// | LOG_DIR | (空) | 日志目录；为空时只输出到终端 |
/// | LOG_JSON | false | JSON 日志 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | MAX_UPLOAD_BYTES | 10485760 | 批量导入文件大小上限 |
///
/// JWT 相关变量见 [`JwtConfig`]。
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/srv/orders HTTP_PORT=8080 cargo run -p order-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 允许跨域的前端地址
    pub app_url: String,
    /// 订单编号前缀
    pub order_code_prefix: String,
    pub db_namespace: String,
    pub db_name: String,
    /// 邮件中继地址
    pub mail_relay_url: Option<String>,
    pub mail_from: String,
    pub mail_signature: String,
    pub log_level: Option<String>,
    pub log_dir: Option<String>,
    pub log_json: bool,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 上传文件大小上限 (字节)
    pub max_upload_bytes: usize,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: env_or("WORK_DIR", "./data"),
            http_port: env_parse("HTTP_PORT", 4000),
            environment: env_or("ENVIRONMENT", "development"),
            jwt: JwtConfig::default(),
            app_url: env_or("APP_URL", "http://localhost:3000"),
            order_code_prefix: env_or("ORDER_CODE_PREFIX", "PMTO"),
            db_namespace: env_or("DB_NAMESPACE", "sales"),
            db_name: env_or("DB_NAME", "orders"),
            mail_relay_url: env_opt("MAIL_RELAY_URL"),
            mail_from: env_or("MAIL_FROM", "orders@promarktech.local"),
            mail_signature: env_or("MAIL_SIGNATURE", "Promark Tech Solutions"),
            log_level: env_opt("LOG_LEVEL"),
            log_dir: env_opt("LOG_DIR"),
            log_json: env_parse("LOG_JSON", false),
            request_timeout_ms: env_parse("REQUEST_TIMEOUT_MS", 30_000),
            max_upload_bytes: env_parse("MAX_UPLOAD_BYTES", 10 * 1024 * 1024),
        }
    }

    /// 使用自定义工作目录 (测试用)
    pub fn with_work_dir(work_dir: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config
    }

    /// 数据库目录 `work_dir/database`
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_dir_under_work_dir() {
        let config = Config::with_work_dir("/tmp/orders-test");
        assert_eq!(
            config.database_dir(),
            PathBuf::from("/tmp/orders-test/database")
        );
    }

    #[test]
    fn test_env_parse_falls_back() {
        assert_eq!(env_parse::<u16>("ORDER_SERVER_TEST_UNSET_PORT", 4000), 4000);
    }
}
