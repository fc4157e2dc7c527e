//! 集成测试公共工具: 内存数据库上的服务器状态与测试用户

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use order_server::auth::password::hash_password;
use order_server::db::DbService;
use order_server::db::models::NewUser;
use order_server::mail::{MailError, Mailer, OutgoingMail};
use order_server::{Config, CurrentUser, ServerState};
use serde_json::{Value, json};
use shared::models::{OrderCreate, Role};

pub const TEST_PASSWORD: &str = "Secret@123";

fn test_config() -> Config {
    let mut config = Config::with_work_dir(std::env::temp_dir().to_string_lossy().into_owned());
    config.jwt.secret = "integration-test-secret-with-32-plus-chars".to_string();
    config
}

/// 每个测试一份独立的内存库
pub async fn test_state() -> ServerState {
    ServerState::in_memory(test_config())
        .await
        .expect("in-memory state")
}

/// 同上，但使用指定的邮件实现
pub async fn test_state_with_mailer(mailer: Arc<dyn Mailer>) -> ServerState {
    let config = test_config();
    let db = DbService::memory(&config.db_namespace, &config.db_name)
        .await
        .expect("in-memory db")
        .db;
    ServerState::new(config, db, mailer)
}

/// 记录所有发出的邮件
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingMail>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().expect("mailer lock").clone()
    }

    /// 邮件在后台任务中发送，轮询直到数量达到 `count` 或超时
    pub async fn wait_for(&self, count: usize) -> Vec<OutgoingMail> {
        for _ in 0..100 {
            let sent = self.sent();
            if sent.len() >= count {
                return sent;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.sent()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        self.sent.lock().expect("mailer lock").push(mail);
        Ok(())
    }
}

/// 每次发送都失败，并计数
#[derive(Default)]
pub struct FailingMailer {
    attempts: Mutex<usize>,
}

impl FailingMailer {
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().expect("mailer lock")
    }
}

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _mail: OutgoingMail) -> Result<(), MailError> {
        *self.attempts.lock().expect("mailer lock") += 1;
        Err(MailError::Transport("relay down".to_string()))
    }
}

/// 注册一个用户并返回其请求上下文
pub async fn seed_user(state: &ServerState, username: &str, role: Role) -> CurrentUser {
    let user = state
        .users
        .create(NewUser {
            username: username.to_string(),
            email: format!("{username}@promark.test"),
            password_hash: hash_password(TEST_PASSWORD).expect("hash"),
            role,
        })
        .await
        .expect("seed user");
    CurrentUser {
        id: user.id_string(),
        username: user.username,
        email: user.email,
        role: user.role,
    }
}

/// (2×100 @18%) + (1×50 含税), 无运费安装费 → 286
pub fn order_body() -> Value {
    json!({
        "customername": "Acme Schools",
        "name": "R. Sharma",
        "contactNo": "9876543210",
        "customerEmail": "buyer@acme.in",
        "city": "Patna",
        "state": "Bihar",
        "pinCode": "800001",
        "shippingAddress": "Plot 4, Boring Road",
        "billingAddress": "Plot 4, Boring Road",
        "paymentTerms": "Credit",
        "dispatchFrom": "Morinda",
        "products": [
            { "productType": "IFPD", "qty": 2, "unitPrice": 100, "gst": "18", "warranty": "3 Years" },
            { "productType": "Stand", "qty": 1, "unitPrice": 50, "gst": "including", "warranty": "1 Year" }
        ]
    })
}

pub fn order_input() -> OrderCreate {
    serde_json::from_value(order_body()).expect("valid order body")
}
