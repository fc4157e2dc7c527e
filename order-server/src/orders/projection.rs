//! Role-scoped worklists
//!
//! Each department queue is a pure predicate over the current order state,
//! evaluated on every read. Nothing is cached or materialised.

use shared::models::*;

use crate::db::models::Order;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Projection {
    FinishedGoods,
    Verification,
    Bill,
    Installation,
    Accounts,
    ProductionApproval,
    Production,
}

/// Warehouses that ship from stock and never queue for production
const STOCK_ORIGINS: [DispatchOrigin; 7] = [
    DispatchOrigin::Patna,
    DispatchOrigin::Bareilly,
    DispatchOrigin::Ranchi,
    DispatchOrigin::Lucknow,
    DispatchOrigin::Delhi,
    DispatchOrigin::Jaipur,
    DispatchOrigin::Rajasthan,
];

const INSTALLATION_QUEUE: [InstallationStatus; 7] = [
    InstallationStatus::Pending,
    InstallationStatus::InProgress,
    InstallationStatus::Failed,
    InstallationStatus::Completed,
    InstallationStatus::HoldBySalesperson,
    InstallationStatus::HoldByCustomer,
    InstallationStatus::SiteNotReady,
];

impl Projection {
    pub const ALL: [Projection; 7] = [
        Projection::FinishedGoods,
        Projection::Verification,
        Projection::Bill,
        Projection::Installation,
        Projection::Accounts,
        Projection::ProductionApproval,
        Projection::Production,
    ];

    /// URL segment under `/api/orders/`
    pub fn slug(&self) -> &'static str {
        match self {
            Projection::FinishedGoods => "finished-goods",
            Projection::Verification => "verification",
            Projection::Bill => "bill",
            Projection::Installation => "installation",
            Projection::Accounts => "accounts",
            Projection::ProductionApproval => "production-approval",
            Projection::Production => "production",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.slug() == slug)
    }

    pub fn matches(&self, order: &Order) -> bool {
        match self {
            Projection::FinishedGoods => {
                order.fulfilling_status == FulfillingStatus::Fulfilled
                    && order.stamp != Some(Receipt::Received)
            }
            Projection::Verification => {
                matches!(
                    order.payment_terms.value(),
                    Some(PaymentTerms::FullAdvance | PaymentTerms::PartialAdvance)
                ) && !matches!(order.sostatus, SoStatus::AccountsApproved | SoStatus::Approved)
            }
            Projection::Bill => {
                order.sostatus == SoStatus::Approved
                    && order.bill_status != BillStatus::BillingComplete
            }
            Projection::Installation => {
                order.dispatch_status == DispatchStatus::Delivered
                    && order.installation_report != Some(YesNo::Yes)
                    && INSTALLATION_QUEUE.contains(&order.installation_status)
            }
            Projection::Accounts => {
                order.installation_status == InstallationStatus::Completed
                    && order.payment_received != Receipt::Received
            }
            Projection::ProductionApproval => {
                order.sostatus == SoStatus::AccountsApproved
                    || (order.sostatus == SoStatus::PendingApproval
                        && order.payment_terms.is(&PaymentTerms::Credit))
            }
            Projection::Production => {
                order.sostatus == SoStatus::Approved
                    && !order
                        .dispatch_from
                        .value()
                        .is_some_and(|origin| STOCK_ORIGINS.contains(origin))
                    && order.fulfilling_status != FulfillingStatus::Fulfilled
            }
        }
    }

    /// Keep only the orders in this queue, preserving order
    pub fn filter(&self, orders: Vec<Order>) -> Vec<Order> {
        orders.into_iter().filter(|o| self.matches(o)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::testing::sample_order;
    use shared::util::Blankable;

    #[test]
    fn slugs_round_trip() {
        for p in Projection::ALL {
            assert_eq!(Projection::from_slug(p.slug()), Some(p));
        }
        assert_eq!(Projection::from_slug("shipping"), None);
    }

    #[test]
    fn finished_goods_until_stamped() {
        let mut order = sample_order();
        assert!(!Projection::FinishedGoods.matches(&order));
        order.fulfilling_status = FulfillingStatus::Fulfilled;
        assert!(Projection::FinishedGoods.matches(&order));
        order.stamp = Some(Receipt::NotReceived);
        assert!(Projection::FinishedGoods.matches(&order));
        order.stamp = Some(Receipt::Received);
        assert!(!Projection::FinishedGoods.matches(&order));
    }

    #[test]
    fn verification_needs_advance_terms() {
        let mut order = sample_order();
        order.payment_terms = Blankable::Value(PaymentTerms::PartialAdvance);
        assert!(Projection::Verification.matches(&order));
        order.sostatus = SoStatus::AccountsApproved;
        assert!(!Projection::Verification.matches(&order));
        order.sostatus = SoStatus::PendingApproval;
        order.payment_terms = Blankable::Value(PaymentTerms::Credit);
        assert!(!Projection::Verification.matches(&order));
        order.payment_terms = Blankable::Blank;
        assert!(!Projection::Verification.matches(&order));
    }

    #[test]
    fn production_approval_paths() {
        let mut order = sample_order();
        order.payment_terms = Blankable::Value(PaymentTerms::Credit);
        assert!(Projection::ProductionApproval.matches(&order));
        order.payment_terms = Blankable::Value(PaymentTerms::FullAdvance);
        assert!(!Projection::ProductionApproval.matches(&order));
        order.sostatus = SoStatus::AccountsApproved;
        assert!(Projection::ProductionApproval.matches(&order));
        order.sostatus = SoStatus::Approved;
        assert!(!Projection::ProductionApproval.matches(&order));
    }

    #[test]
    fn bill_and_accounts() {
        let mut order = sample_order();
        order.sostatus = SoStatus::Approved;
        assert!(Projection::Bill.matches(&order));
        order.bill_status = BillStatus::BillingComplete;
        assert!(!Projection::Bill.matches(&order));

        order.installation_status = InstallationStatus::Completed;
        assert!(Projection::Accounts.matches(&order));
        order.payment_received = Receipt::Received;
        assert!(!Projection::Accounts.matches(&order));
    }

    #[test]
    fn installation_after_delivery_until_reported() {
        let mut order = sample_order();
        assert!(!Projection::Installation.matches(&order));
        order.dispatch_status = DispatchStatus::Delivered;
        assert!(Projection::Installation.matches(&order));
        order.installation_report = Some(YesNo::No);
        assert!(Projection::Installation.matches(&order));
        order.installation_report = Some(YesNo::Yes);
        assert!(!Projection::Installation.matches(&order));
    }

    #[test]
    fn production_only_for_plant_or_undecided_origin() {
        let mut order = sample_order();
        order.sostatus = SoStatus::Approved;
        order.dispatch_from = Blankable::Value(DispatchOrigin::Morinda);
        assert!(Projection::Production.matches(&order));
        order.dispatch_from = Blankable::Blank;
        assert!(Projection::Production.matches(&order));
        order.dispatch_from = Blankable::Value(DispatchOrigin::Delhi);
        assert!(!Projection::Production.matches(&order));
        order.dispatch_from = Blankable::Value(DispatchOrigin::Morinda);
        order.fulfilling_status = FulfillingStatus::Fulfilled;
        assert!(!Projection::Production.matches(&order));
    }
}
