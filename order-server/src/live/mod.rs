//! 实时事件广播
//!
//! 订单生命周期事件经 [`Broadcaster`] 扇出：
//! - 进程内订阅者 (tokio broadcast channel，测试和内部任务使用)
//! - Socket.IO 客户端 (`global` 房间 / 用户房间)
//!
//! 尽力而为，不保证送达，也不重放。

pub mod change_feed;
pub mod socket;

use std::sync::OnceLock;

use async_trait::async_trait;
use shared::message::LiveEvent;
use socketioxide::SocketIo;
use tokio::sync::broadcast;

/// 进程内通道容量
const CHANNEL_CAPACITY: usize = 256;

/// 事件扇出能力
#[async_trait]
pub trait Broadcaster: Send + Sync {
    async fn publish(&self, event: LiveEvent);
}

/// 默认广播实现
pub struct LiveHub {
    tx: broadcast::Sender<LiveEvent>,
    io: OnceLock<SocketIo>,
}

impl LiveHub {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            tx,
            io: OnceLock::new(),
        }
    }

    /// 挂载 Socket.IO 实例 (只生效一次)
    pub fn attach(&self, io: SocketIo) {
        if self.io.set(io).is_err() {
            tracing::warn!("Socket.IO already attached to live hub");
        }
    }

    /// 订阅进程内事件
    pub fn subscribe(&self) -> broadcast::Receiver<LiveEvent> {
        self.tx.subscribe()
    }
}

impl Default for LiveHub {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Broadcaster for LiveHub {
    async fn publish(&self, event: LiveEvent) {
        // 没有订阅者时 send 返回 Err，属正常情况
        let _ = self.tx.send(event.clone());

        let Some(io) = self.io.get() else {
            return;
        };
        let room = event.scope.room().to_string();
        if let Err(e) = io.to(room.clone()).emit(event.kind.as_str(), &event.payload).await {
            tracing::warn!(event = %event.kind, room = %room, error = %e, "Live emit failed");
        } else {
            tracing::debug!(event = %event.kind, room = %room, source = ?event.source, "Live event emitted");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::message::{EventSource, LiveEventKind, OrderEventPayload};

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let hub = LiveHub::new();
        let mut rx = hub.subscribe();
        let payload = OrderEventPayload {
            id: "sales_order:abc".into(),
            order_code: "PMTO7".into(),
            customername: "Acme".into(),
            notification: None,
        };
        hub.publish(LiveEvent::order(LiveEventKind::NewOrder, EventSource::Handler, &payload))
            .await;

        let event = rx.recv().await.unwrap();
        assert_eq!(event.kind, LiveEventKind::NewOrder);
        assert_eq!(event.payload["orderId"], "PMTO7");
    }

    #[tokio::test]
    async fn publishing_without_listeners_is_fine() {
        let hub = LiveHub::default();
        let payload = OrderEventPayload {
            id: "sales_order:abc".into(),
            order_code: "PMTO7".into(),
            customername: "Acme".into(),
            notification: None,
        };
        hub.publish(LiveEvent::order(LiveEventKind::DeleteOrder, EventSource::Handler, &payload))
            .await;
    }
}
