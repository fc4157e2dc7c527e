//! 实时事件类型定义
//!
//! order-server 通过 Socket.IO 推送这些事件，前端按 `event` 名订阅。
//! 同一笔订单的 `newOrder` 可能由请求处理器和数据库变更流各发一次，
//! 客户端用 [`EventDeduper`] 去重。

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod dedup;
pub mod payload;

pub use dedup::EventDeduper;
pub use payload::*;

/// 全员房间名
pub const GLOBAL_ROOM: &str = "global";

/// 推送事件名
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiveEventKind {
    #[serde(rename = "newOrder")]
    NewOrder,
    #[serde(rename = "updateOrder")]
    UpdateOrder,
    #[serde(rename = "deleteOrder")]
    DeleteOrder,
    #[serde(rename = "passwordChange")]
    PasswordChange,
}

impl LiveEventKind {
    /// Socket.IO 事件名
    pub const fn as_str(&self) -> &'static str {
        match self {
            LiveEventKind::NewOrder => "newOrder",
            LiveEventKind::UpdateOrder => "updateOrder",
            LiveEventKind::DeleteOrder => "deleteOrder",
            LiveEventKind::PasswordChange => "passwordChange",
        }
    }
}

impl fmt::Display for LiveEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 投递范围
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "room", rename_all = "snake_case")]
pub enum EventScope {
    /// 所有已 join 的连接
    Global,
    /// 仅某个用户自己的房间
    User(String),
}

impl EventScope {
    /// 对应的 Socket.IO 房间名
    pub fn room(&self) -> &str {
        match self {
            EventScope::Global => GLOBAL_ROOM,
            EventScope::User(id) => id,
        }
    }
}

/// 事件来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSource {
    /// 请求处理器
    Handler,
    /// 数据库变更流
    ChangeFeed,
}

/// 一条待推送的实时事件
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveEvent {
    pub kind: LiveEventKind,
    pub scope: EventScope,
    pub source: EventSource,
    pub payload: serde_json::Value,
}

impl LiveEvent {
    /// 订单事件（全员房间）
    pub fn order(kind: LiveEventKind, source: EventSource, payload: &OrderEventPayload) -> Self {
        Self {
            kind,
            scope: EventScope::Global,
            source,
            payload: serde_json::to_value(payload).unwrap_or_default(),
        }
    }

    /// 密码变更事件（仅本人房间）
    pub fn password_changed(payload: &PasswordChangePayload) -> Self {
        Self {
            kind: LiveEventKind::PasswordChange,
            scope: EventScope::User(payload.user_id.clone()),
            source: EventSource::Handler,
            payload: serde_json::to_value(payload).unwrap_or_default(),
        }
    }

    /// 去重键: 事件名 + 订单 id
    pub fn dedup_key(&self) -> Option<(LiveEventKind, String)> {
        self.payload
            .get("_id")
            .and_then(|v| v.as_str())
            .map(|id| (self.kind, id.to_string()))
    }
}

/// 客户端 join 请求
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(LiveEventKind::NewOrder.as_str(), "newOrder");
        assert_eq!(
            serde_json::to_string(&LiveEventKind::PasswordChange).unwrap(),
            "\"passwordChange\""
        );
    }

    #[test]
    fn test_scope_rooms() {
        assert_eq!(EventScope::Global.room(), "global");
        assert_eq!(EventScope::User("user:abc".into()).room(), "user:abc");
    }

    #[test]
    fn test_password_event_targets_user_room() {
        let event = LiveEvent::password_changed(&PasswordChangePayload {
            user_id: "user:abc".into(),
            email: "a@b.co".into(),
            timestamp: chrono::Utc::now(),
        });
        assert_eq!(event.scope, EventScope::User("user:abc".into()));
        assert!(event.dedup_key().is_none());
    }
}
