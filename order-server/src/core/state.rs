use std::sync::Arc;
use std::time::Instant;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::{Config, Result};
use crate::db::DbService;
use crate::db::repository::{NotificationRepository, UserRepository};
use crate::live::{Broadcaster, LiveHub};
use crate::mail::{HttpMailer, LogMailer, Mailer};
use crate::orders::{LifecycleSettings, OrderLifecycle};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 所有字段都是浅拷贝 (Arc / Surreal 句柄)，每个请求 clone 一份。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | live | Arc<LiveHub> | 实时推送 |
/// | mailer | Arc<dyn Mailer> | 邮件发送 |
/// | orders | OrderLifecycle | 订单生命周期 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
    pub live: Arc<LiveHub>,
    pub mailer: Arc<dyn Mailer>,
    pub orders: OrderLifecycle,
    pub users: UserRepository,
    pub notifications: NotificationRepository,
    pub started_at: Instant,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ServerState {
    /// 用已打开的数据库组装状态
    pub fn new(config: Config, db: Surreal<Db>, mailer: Arc<dyn Mailer>) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let live = Arc::new(LiveHub::new());
        let broadcaster: Arc<dyn Broadcaster> = live.clone();
        let orders = OrderLifecycle::new(
            db.clone(),
            broadcaster,
            mailer.clone(),
            LifecycleSettings {
                code_prefix: config.order_code_prefix.clone(),
                mail_signature: config.mail_signature.clone(),
            },
        );

        Self {
            users: UserRepository::new(db.clone()),
            notifications: NotificationRepository::new(db.clone()),
            config,
            db,
            jwt_service,
            live,
            mailer,
            orders,
            started_at: Instant::now(),
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 工作目录结构
    /// 2. 数据库 (work_dir/database)
    /// 3. 邮件: 配置了 MAIL_RELAY_URL 用 HTTP 中继，否则只记日志
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir_structure()?;

        let db = DbService::open(&config.database_dir(), &config.db_namespace, &config.db_name)
            .await?
            .db;

        let mailer: Arc<dyn Mailer> = match &config.mail_relay_url {
            Some(url) => {
                tracing::info!(relay = %url, "Mail relay configured");
                Arc::new(HttpMailer::new(url.clone(), config.mail_from.clone()))
            }
            None => {
                tracing::warn!("MAIL_RELAY_URL not set, outgoing mail is only logged");
                Arc::new(LogMailer)
            }
        };

        Ok(Self::new(config.clone(), db, mailer))
    }

    /// 内存数据库 + 日志邮件 (测试用)
    pub async fn in_memory(config: Config) -> Result<Self> {
        let db = DbService::memory(&config.db_namespace, &config.db_name)
            .await?
            .db;
        Ok(Self::new(config, db, Arc::new(LogMailer)))
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// 实时推送 (trait object)
    pub fn broadcaster(&self) -> Arc<dyn Broadcaster> {
        self.live.clone()
    }
}
