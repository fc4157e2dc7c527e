//! 客户端事件去重
//!
//! 记住最近见过的 (事件名, 订单 id)，窗口内重复的直接丢弃。

use super::{LiveEvent, LiveEventKind};
use std::collections::{HashSet, VecDeque};
use std::time::{Duration, Instant};

type Key = (LiveEventKind, String);

/// 固定容量 + 时间窗口的去重器
#[derive(Debug)]
pub struct EventDeduper {
    window: Duration,
    capacity: usize,
    order: VecDeque<(Key, Instant)>,
    seen: HashSet<Key>,
}

impl EventDeduper {
    pub fn new(window: Duration, capacity: usize) -> Self {
        Self {
            window,
            capacity: capacity.max(1),
            order: VecDeque::new(),
            seen: HashSet::new(),
        }
    }

    /// 首次出现返回 true；窗口内重复返回 false。无订单 id 的事件总是放行
    pub fn accept(&mut self, event: &LiveEvent) -> bool {
        self.accept_at(event, Instant::now())
    }

    fn accept_at(&mut self, event: &LiveEvent, now: Instant) -> bool {
        let Some(key) = event.dedup_key() else {
            return true;
        };
        self.evict(now);
        if self.seen.contains(&key) {
            return false;
        }
        if self.order.len() == self.capacity
            && let Some((old, _)) = self.order.pop_front()
        {
            self.seen.remove(&old);
        }
        self.seen.insert(key.clone());
        self.order.push_back((key, now));
        true
    }

    fn evict(&mut self, now: Instant) {
        while let Some((key, at)) = self.order.front() {
            if now.duration_since(*at) < self.window {
                break;
            }
            self.seen.remove(key);
            self.order.pop_front();
        }
    }
}

impl Default for EventDeduper {
    fn default() -> Self {
        Self::new(Duration::from_secs(10), 512)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{EventSource, OrderEventPayload};

    fn event(kind: LiveEventKind, source: EventSource, id: &str) -> LiveEvent {
        LiveEvent::order(
            kind,
            source,
            &OrderEventPayload {
                id: id.into(),
                order_code: "PMTO1".into(),
                customername: "Acme".into(),
                notification: None,
            },
        )
    }

    #[test]
    fn drops_change_feed_duplicate() {
        let mut d = EventDeduper::default();
        assert!(d.accept(&event(LiveEventKind::NewOrder, EventSource::Handler, "sales_order:1")));
        assert!(!d.accept(&event(LiveEventKind::NewOrder, EventSource::ChangeFeed, "sales_order:1")));
        // 同一订单的其他事件不受影响
        assert!(d.accept(&event(LiveEventKind::UpdateOrder, EventSource::Handler, "sales_order:1")));
    }

    #[test]
    fn window_expiry_allows_again() {
        let mut d = EventDeduper::new(Duration::from_millis(50), 8);
        let start = Instant::now();
        let e = event(LiveEventKind::NewOrder, EventSource::Handler, "sales_order:2");
        assert!(d.accept_at(&e, start));
        assert!(!d.accept_at(&e, start + Duration::from_millis(10)));
        assert!(d.accept_at(&e, start + Duration::from_millis(60)));
    }

    #[test]
    fn capacity_bounds_memory() {
        let mut d = EventDeduper::new(Duration::from_secs(60), 2);
        let now = Instant::now();
        for id in ["a", "b", "c"] {
            assert!(d.accept_at(&event(LiveEventKind::NewOrder, EventSource::Handler, id), now));
        }
        // "a" 被挤出
        assert!(d.accept_at(&event(LiveEventKind::NewOrder, EventSource::Handler, "a"), now));
    }
}
