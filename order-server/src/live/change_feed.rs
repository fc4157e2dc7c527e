//! 订单表变更订阅
//!
//! 通过 SurrealDB LIVE SELECT 监听 `sales_order`，每次插入都再广播一次
//! `newOrder`。与请求处理器自身的广播可能重复，客户端按订单 id 去重
//! (见 `shared::message::EventDeduper`)。

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use shared::message::{EventSource, LiveEvent, LiveEventKind, OrderEventPayload};
use surrealdb::engine::local::Db;
use surrealdb::{Action, Notification, Surreal};

use super::Broadcaster;
use crate::db::models::{ORDER_TABLE, Order};

/// 订阅中断后的重连间隔
const RESUBSCRIBE_DELAY: Duration = Duration::from_secs(5);

/// 常驻任务：随进程存活
pub fn spawn(db: Surreal<Db>, broadcaster: Arc<dyn Broadcaster>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match run(&db, broadcaster.as_ref()).await {
                Ok(()) => tracing::warn!("Order change feed ended, resubscribing"),
                Err(e) => tracing::error!(error = %e, "Order change feed failed, resubscribing"),
            }
            tokio::time::sleep(RESUBSCRIBE_DELAY).await;
        }
    })
}

async fn run(db: &Surreal<Db>, broadcaster: &dyn Broadcaster) -> Result<(), surrealdb::Error> {
    let mut stream = db.select::<Vec<Order>>(ORDER_TABLE).live().await?;
    tracing::info!(table = ORDER_TABLE, "Order change feed subscribed");

    while let Some(item) = stream.next().await {
        let notification: Notification<Order> = match item {
            Ok(n) => n,
            Err(e) => {
                tracing::warn!(error = %e, "Change feed item skipped");
                continue;
            }
        };
        if let Some(event) = to_event(notification.action, &notification.data) {
            broadcaster.publish(event).await;
        }
    }
    Ok(())
}

/// 只转发插入；更新和删除由请求处理器广播
fn to_event(action: Action, order: &Order) -> Option<LiveEvent> {
    if action != Action::Create {
        return None;
    }
    tracing::debug!(order_code = %order.order_code, "New order seen on change feed");
    let payload = OrderEventPayload {
        id: order.id_string(),
        order_code: order.order_code.clone(),
        customername: order.customername.clone(),
        notification: None,
    };
    Some(LiveEvent::order(
        LiveEventKind::NewOrder,
        EventSource::ChangeFeed,
        &payload,
    ))
}
