//! Order lifecycle engine
//!
//! Every mutation goes through here: validate, derive, persist, then the side
//! effects (notification row, live event, customer email). Side effects after
//! the write never fail the request.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::message::{EventSource, LiveEvent, LiveEventKind, NotificationBrief, OrderEventPayload};
use shared::models::{CreatorSummary, NotificationScope, OrderCreate, OrderPatch};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{bulk, export, hooks, projection::Projection, validation};
use crate::auth::CurrentUser;
use crate::db::models::{Order, OrderView};
use crate::db::repository::counter::ORDER_COUNTER;
use crate::db::repository::{
    CounterRepository, NotificationRepository, OrderRepository, RepoError, UserRepository,
};
use crate::live::Broadcaster;
use crate::mail::{self, Mailer, templates};
use crate::security_log;
use crate::spreadsheet::{SheetRow, Table};

/// Settings the engine needs from the server config
#[derive(Debug, Clone)]
pub struct LifecycleSettings {
    pub code_prefix: String,
    pub mail_signature: String,
}

impl Default for LifecycleSettings {
    fn default() -> Self {
        Self {
            code_prefix: "PMTO".to_string(),
            mail_signature: "Promark Tech Solutions".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct OrderLifecycle {
    orders: OrderRepository,
    users: UserRepository,
    counters: CounterRepository,
    notifications: NotificationRepository,
    broadcaster: Arc<dyn Broadcaster>,
    mailer: Arc<dyn Mailer>,
    settings: LifecycleSettings,
}

fn order_not_found() -> AppError {
    AppError::new(ErrorCode::OrderNotFound)
}

/// Record-id problems are the caller's fault, everything else is ours
fn lookup_error(err: RepoError) -> AppError {
    match err {
        RepoError::Validation(_) => AppError::new(ErrorCode::InvalidOrderId),
        RepoError::NotFound(_) => order_not_found(),
        other => other.into(),
    }
}

impl OrderLifecycle {
    pub fn new(
        db: Surreal<Db>,
        broadcaster: Arc<dyn Broadcaster>,
        mailer: Arc<dyn Mailer>,
        settings: LifecycleSettings,
    ) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            users: UserRepository::new(db.clone()),
            counters: CounterRepository::new(db.clone()),
            notifications: NotificationRepository::new(db),
            broadcaster,
            mailer,
            settings,
        }
    }

    fn code_for(&self, sequence: u64) -> String {
        format!("{}{}", self.settings.code_prefix, sequence)
    }

    // ========== Create ==========

    pub async fn create(&self, input: OrderCreate, actor: &CurrentUser) -> AppResult<Order> {
        let now = Utc::now();
        let mut order = validation::prepare_create(input, &actor.id, now)?;

        let sequence = self.counters.reserve(ORDER_COUNTER, 1).await?;
        order.sequence = sequence;
        order.order_code = self.code_for(sequence);

        let saved = self.orders.create(order).await?;
        tracing::info!(
            order_code = %saved.order_code,
            created_by = %actor.id,
            total = saved.total,
            "Order created"
        );

        let message = format!(
            "New sales order created by {} for {} (Order ID: {})",
            actor.username,
            non_empty(&saved.customername, "Unknown"),
            saved.order_code
        );
        let notification = self.notify(message, actor).await;
        self.emit(LiveEventKind::NewOrder, &saved, notification).await;

        if !saved.customer_email.is_empty() {
            mail::spawn_send(
                self.mailer.clone(),
                templates::order_confirmation(&saved, &self.settings.mail_signature),
            );
        }
        Ok(saved)
    }

    // ========== Edit ==========

    pub async fn edit(&self, id: &str, mut patch: OrderPatch, actor: &CurrentUser) -> AppResult<Order> {
        let current = self
            .orders
            .find_by_id(id)
            .await
            .map_err(lookup_error)?
            .ok_or_else(order_not_found)?;

        let now = Utc::now();
        hooks::after_edit(&mut patch, &current, now);

        let mut fields = serde_json::to_value(&patch)
            .map_err(|e| AppError::internal(format!("Failed to encode order patch: {e}")))?;
        if let Some(map) = fields.as_object_mut() {
            map.insert("updatedAt".to_string(), serde_json::json!(now));
        }
        let updated = self.orders.merge(id, fields).await.map_err(lookup_error)?;
        tracing::info!(
            order_code = %updated.order_code,
            updated_by = %actor.id,
            "Order updated"
        );

        if let Some(status) = patch.dispatch_status
            && status.notifies_customer()
            && !updated.customer_email.is_empty()
            && let Some(mail) =
                templates::dispatch_update(&updated, status, &self.settings.mail_signature)
        {
            mail::spawn_send(self.mailer.clone(), mail);
        }

        let message = format!(
            "Order updated by {} for {} (Order ID: {})",
            actor.username,
            non_empty(&updated.customername, "Unknown"),
            updated.order_code
        );
        let notification = self.notify(message, actor).await;
        self.emit(LiveEventKind::UpdateOrder, &updated, notification).await;
        Ok(updated)
    }

    // ========== Delete ==========

    pub async fn delete(&self, id: &str, actor: &CurrentUser) -> AppResult<Order> {
        let current = self
            .orders
            .find_by_id(id)
            .await
            .map_err(lookup_error)?
            .ok_or_else(order_not_found)?;

        if actor.is_owner_scoped() && current.created_by != actor.id {
            security_log!(
                "WARN",
                "order_delete_denied",
                user_id = actor.id.clone(),
                order_code = current.order_code.clone()
            );
            return Err(AppError::new(ErrorCode::OrderNotOwned));
        }

        let removed = self
            .orders
            .delete(id)
            .await
            .map_err(lookup_error)?
            .ok_or_else(order_not_found)?;
        tracing::info!(order_code = %removed.order_code, deleted_by = %actor.id, "Order deleted");

        let message = format!(
            "Order deleted by {} for {} (Order ID: {})",
            actor.username,
            non_empty(&removed.customername, "Unknown"),
            removed.order_code
        );
        let notification = self.notify(message, actor).await;
        self.emit(LiveEventKind::DeleteOrder, &removed, notification).await;
        Ok(removed)
    }

    // ========== Bulk import ==========

    /// Import parsed sheet rows. Every row is validated before a code is
    /// reserved; the insert is a single statement.
    pub async fn bulk_import(&self, rows: &[SheetRow], actor: &CurrentUser) -> AppResult<Vec<Order>> {
        let now = Utc::now();
        let mut drafts = bulk::map_rows(rows, &actor.id, now)?;

        let first = self.counters.reserve(ORDER_COUNTER, drafts.len() as u64).await?;
        for (offset, order) in drafts.iter_mut().enumerate() {
            order.sequence = first + offset as u64;
            order.order_code = self.code_for(order.sequence);
        }

        let inserted = self.orders.insert_many(drafts).await?;
        tracing::info!(count = inserted.len(), imported_by = %actor.id, "Orders imported");

        for order in &inserted {
            self.emit(LiveEventKind::NewOrder, order, None).await;
        }
        Ok(inserted)
    }

    // ========== Queries ==========

    /// Orders visible to `actor`: Sales sees its own, every other role sees all
    pub async fn list_for(&self, actor: &CurrentUser) -> AppResult<Vec<OrderView>> {
        let orders = self.visible_orders(actor).await?;
        self.with_creators(orders).await
    }

    /// One department worklist
    pub async fn projection(&self, view: Projection) -> AppResult<Vec<OrderView>> {
        let orders = view.filter(self.orders.find_all().await?);
        self.with_creators(orders).await
    }

    /// Export layout of everything `actor` may see
    pub async fn export(&self, actor: &CurrentUser) -> AppResult<Table> {
        let orders = self.visible_orders(actor).await?;
        Ok(export::build_table(&orders))
    }

    async fn visible_orders(&self, actor: &CurrentUser) -> AppResult<Vec<Order>> {
        let orders = if actor.is_owner_scoped() {
            self.orders.find_by_creator(&actor.id).await?
        } else {
            self.orders.find_all().await?
        };
        Ok(orders)
    }

    async fn with_creators(&self, orders: Vec<Order>) -> AppResult<Vec<OrderView>> {
        let ids: Vec<String> = orders
            .iter()
            .map(|o| o.created_by.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let creators: HashMap<String, CreatorSummary> = self
            .users
            .find_many(&ids)
            .await?
            .into_iter()
            .map(|u| (u.id_string(), u.summary()))
            .collect();

        Ok(orders
            .into_iter()
            .map(|order| {
                let creator = creators.get(&order.created_by).cloned();
                OrderView { order, creator }
            })
            .collect())
    }

    // ========== Side effects ==========

    async fn notify(&self, message: String, actor: &CurrentUser) -> Option<NotificationBrief> {
        match self
            .notifications
            .append(message, NotificationScope::All, Some(actor.id.clone()))
            .await
        {
            Ok(n) => Some(n.brief()),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to record notification");
                None
            }
        }
    }

    async fn emit(&self, kind: LiveEventKind, order: &Order, notification: Option<NotificationBrief>) {
        let payload = OrderEventPayload {
            id: order.id_string(),
            order_code: order.order_code.clone(),
            customername: order.customername.clone(),
            notification,
        };
        self.broadcaster
            .publish(LiveEvent::order(kind, EventSource::Handler, &payload))
            .await;
    }
}

fn non_empty<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() { fallback } else { value }
}
