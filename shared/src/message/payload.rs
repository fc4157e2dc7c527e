//! 事件负载

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// newOrder / updateOrder / deleteOrder 负载
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderEventPayload {
    /// 记录 id (`sales_order:…`)
    #[serde(rename = "_id")]
    pub id: String,
    /// 订单编号 (PMTO…)
    #[serde(rename = "orderId")]
    pub order_code: String,
    pub customername: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification: Option<NotificationBrief>,
}

/// 随事件一起推送的通知摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationBrief {
    pub id: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// passwordChange 负载
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangePayload {
    pub user_id: String,
    pub email: String,
    pub timestamp: DateTime<Utc>,
}
