//! 邮件发送
//!
//! 客户邮件 (下单确认、发货/送达通知) 通过 [`Mailer`] 发送。
//! 发送在独立任务中进行，失败只记录日志，不影响请求结果。

pub mod templates;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// 邮件错误
#[derive(Debug, Error)]
pub enum MailError {
    #[error("Mail relay unreachable: {0}")]
    Transport(String),

    #[error("Mail relay rejected message: {status} {body}")]
    Rejected { status: u16, body: String },
}

/// 一封纯文本邮件
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub text: String,
}

/// 邮件发送能力
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError>;
}

/// 未配置中继时使用：只写日志
#[derive(Debug, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        tracing::info!(to = %mail.to, subject = %mail.subject, "Mail relay not configured, message logged only");
        Ok(())
    }
}

#[derive(Serialize)]
struct RelayPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

/// 通过 HTTP 中继发送 (POST JSON)
pub struct HttpMailer {
    relay_url: String,
    from: String,
    client: reqwest::Client,
}

impl HttpMailer {
    pub fn new(relay_url: String, from: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            relay_url,
            from,
            client,
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        let resp = self
            .client
            .post(&self.relay_url)
            .json(&RelayPayload {
                from: &self.from,
                to: &mail.to,
                subject: &mail.subject,
                text: &mail.text,
            })
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(MailError::Rejected { status, body });
        }
        tracing::debug!(to = %mail.to, "Mail accepted by relay");
        Ok(())
    }
}

/// 后台发送，不等待结果
pub fn spawn_send(mailer: Arc<dyn Mailer>, mail: OutgoingMail) {
    tokio::spawn(async move {
        let to = mail.to.clone();
        let subject = mail.subject.clone();
        if let Err(e) = mailer.send(mail).await {
            tracing::warn!(to = %to, subject = %subject, error = %e, "Mail sending failed");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn log_mailer_never_fails() {
        let mail = OutgoingMail {
            to: "buyer@acme.in".into(),
            subject: "Order Confirmation".into(),
            text: "hello".into(),
        };
        assert!(LogMailer.send(mail).await.is_ok());
    }

    #[tokio::test]
    async fn unreachable_relay_is_an_error() {
        let mailer = HttpMailer::new("http://127.0.0.1:9/relay".into(), "orders@test".into());
        let mail = OutgoingMail {
            to: "buyer@acme.in".into(),
            subject: "s".into(),
            text: "t".into(),
        };
        assert!(matches!(mailer.send(mail).await, Err(MailError::Transport(_))));
    }
}
