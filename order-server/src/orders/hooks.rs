//! Post-update hooks
//!
//! Cross-field rules that run after a create or an edit has been assembled
//! and before it is persisted. Status axes are otherwise independent; a new
//! transition guard belongs here too.

use chrono::{DateTime, Utc};
use shared::models::{CompletionStatus, FulfillingStatus, OrderPatch};
use shared::util::LooseDate;

use crate::db::models::Order;

fn has_date(value: &Option<LooseDate>) -> bool {
    value.as_ref().is_some_and(|d| !d.is_empty())
}

/// Fulfilled orders are complete and carry a fulfilment date
pub fn after_create(order: &mut Order, now: DateTime<Utc>) {
    if order.fulfilling_status == FulfillingStatus::Fulfilled {
        order.completion_status = CompletionStatus::Complete;
        if !has_date(&order.fulfillment_date) {
            order.fulfillment_date = Some(LooseDate::Date(now));
        }
    }
}

/// Same rule for a partial edit: only fires when the patch itself sets
/// `Fulfilled`. The date is stamped unless the patch supplies one or leaves
/// an already stored one in place; clearing it in the same edit re-stamps.
pub fn after_edit(patch: &mut OrderPatch, current: &Order, now: DateTime<Utc>) {
    if patch.fulfilling_status != Some(FulfillingStatus::Fulfilled) {
        return;
    }
    patch.completion_status = Some(CompletionStatus::Complete);
    let supplied = matches!(&patch.fulfillment_date, Some(date) if has_date(date));
    let kept = patch.fulfillment_date.is_none() && has_date(&current.fulfillment_date);
    if !supplied && !kept {
        patch.fulfillment_date = Some(Some(LooseDate::Date(now)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::testing::sample_order;

    #[test]
    fn fulfilled_edit_completes_and_stamps() {
        let current = sample_order();
        let now = Utc::now();
        let mut patch = OrderPatch {
            fulfilling_status: Some(FulfillingStatus::Fulfilled),
            ..Default::default()
        };
        after_edit(&mut patch, &current, now);
        assert_eq!(patch.completion_status, Some(CompletionStatus::Complete));
        assert_eq!(patch.fulfillment_date, Some(Some(LooseDate::Date(now))));
    }

    #[test]
    fn existing_fulfilment_date_is_kept() {
        let mut current = sample_order();
        current.fulfillment_date = Some(LooseDate::parse("2025-01-10"));
        let mut patch = OrderPatch {
            fulfilling_status: Some(FulfillingStatus::Fulfilled),
            ..Default::default()
        };
        after_edit(&mut patch, &current, Utc::now());
        assert_eq!(patch.completion_status, Some(CompletionStatus::Complete));
        assert!(patch.fulfillment_date.is_none());

        let supplied = LooseDate::parse("2025-02-01");
        let mut patch = OrderPatch {
            fulfilling_status: Some(FulfillingStatus::Fulfilled),
            fulfillment_date: Some(Some(supplied.clone())),
            ..Default::default()
        };
        after_edit(&mut patch, &sample_order(), Utc::now());
        assert_eq!(patch.fulfillment_date, Some(Some(supplied)));
    }

    #[test]
    fn clearing_the_date_while_fulfilling_restamps() {
        let mut current = sample_order();
        current.fulfillment_date = Some(LooseDate::parse("2025-01-10"));
        let now = Utc::now();
        let mut patch = OrderPatch {
            fulfilling_status: Some(FulfillingStatus::Fulfilled),
            fulfillment_date: Some(None),
            ..Default::default()
        };
        after_edit(&mut patch, &current, now);
        assert_eq!(patch.fulfillment_date, Some(Some(LooseDate::Date(now))));
    }

    #[test]
    fn other_statuses_do_nothing() {
        let mut patch = OrderPatch {
            fulfilling_status: Some(FulfillingStatus::PartialDispatch),
            ..Default::default()
        };
        after_edit(&mut patch, &sample_order(), Utc::now());
        assert!(patch.completion_status.is_none());
        assert!(patch.fulfillment_date.is_none());
    }

    #[test]
    fn create_hook_respects_status() {
        let mut order = sample_order();
        order.fulfilling_status = FulfillingStatus::Fulfilled;
        after_create(&mut order, Utc::now());
        assert_eq!(order.completion_status, CompletionStatus::Complete);
        assert!(order.fulfillment_date.is_some());
    }
}
