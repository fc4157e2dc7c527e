//! Sales order domain
//!
//! Validation, money derivation, lifecycle hooks, worklist projections,
//! bulk import and export. [`OrderLifecycle`] ties them to storage and
//! the side-effect channels.

pub mod bulk;
pub mod engine;
pub mod export;
pub mod hooks;
pub mod money;
pub mod projection;
pub mod validation;

pub use engine::{LifecycleSettings, OrderLifecycle};
pub use projection::Projection;

#[cfg(test)]
pub(crate) mod testing {
    use chrono::Utc;
    use shared::models::*;
    use shared::util::Blankable;

    use crate::db::models::Order;

    pub fn sample_line(product_type: &str) -> ProductLine {
        ProductLine {
            product_type: product_type.to_string(),
            size: "65 inch".to_string(),
            spec: "4K".to_string(),
            qty: 2.0,
            unit_price: 100.0,
            gst: GstRate::Eighteen,
            model_nos: vec!["PM-65".to_string()],
            brand: None,
            warranty: "1 Year".to_string(),
        }
    }

    /// Freshly created order with every status at its default
    pub fn sample_order() -> Order {
        Order {
            id: None,
            order_code: "PMTO1".to_string(),
            sequence: 1,
            created_at: Utc::now(),
            created_by: "user:alice".to_string(),
            updated_at: None,
            customername: "Acme Schools".to_string(),
            name: "R. Mehta".to_string(),
            contact_no: "9876543210".to_string(),
            alterno: None,
            customer_email: "buyer@acme.in".to_string(),
            gstno: None,
            city: "Ludhiana".to_string(),
            state: "Punjab".to_string(),
            pin_code: "141001".to_string(),
            shipping_address: "12 Mall Road".to_string(),
            billing_address: "12 Mall Road".to_string(),
            same_address: true,
            products: vec![sample_line("IFPD")],
            total: 236.0,
            payment_collected: 0.0,
            payment_due: 236.0,
            payment_method: Blankable::Blank,
            payment_terms: Blankable::Blank,
            credit_days: None,
            neft_transaction_id: None,
            cheque_id: None,
            freightcs: 0.0,
            freightstatus: FreightStatus::default(),
            actual_freight: None,
            installation: 0.0,
            installchargesstatus: InstallChargesStatus::default(),
            order_type: OrderType::default(),
            company: Blankable::Value(Company::Promark),
            dispatch_from: Blankable::Blank,
            gem_order_number: None,
            sales_person: None,
            report: None,
            fulfilling_status: FulfillingStatus::Pending,
            dispatch_status: DispatchStatus::default(),
            installation_status: InstallationStatus::default(),
            installation_report: None,
            bill_status: BillStatus::default(),
            payment_received: Receipt::default(),
            completion_status: CompletionStatus::default(),
            sostatus: SoStatus::default(),
            stock_status: StockStatus::default(),
            stamp: None,
            transporter: None,
            transporter_details: None,
            docket_no: None,
            invoice_no: None,
            bill_number: None,
            pi_number: None,
            so_date: None,
            dispatch_date: None,
            receipt_date: None,
            invoice_date: None,
            delivery_date: None,
            demo_date: None,
            fulfillment_date: None,
            remarks: None,
            remarks_by_installation: None,
            remarks_by_production: None,
            remarks_by_accounts: None,
            remarks_by_billing: None,
            remarks_bydispatch: None,
            verification_remarks: None,
        }
    }
}
