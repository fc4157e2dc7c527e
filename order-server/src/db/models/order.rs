//! Sales Order Model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::models::*;
use shared::util::{Blankable, LooseDate};
use surrealdb::RecordId;

pub const ORDER_TABLE: &str = "sales_order";

/// Order ID type
pub type OrderId = RecordId;

/// Order document as stored in `sales_order`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<OrderId>,
    /// Human readable code, e.g. `PMTO42`
    #[serde(rename = "orderId")]
    pub order_code: String,
    /// Numeric part of the code; sort key
    pub sequence: u64,
    pub created_at: DateTime<Utc>,
    /// Creator's user id (`user:…`)
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    // Customer
    pub customername: String,
    pub name: String,
    pub contact_no: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alterno: Option<String>,
    pub customer_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gstno: Option<String>,
    pub city: String,
    pub state: String,
    pub pin_code: String,
    pub shipping_address: String,
    pub billing_address: String,
    #[serde(default)]
    pub same_address: bool,

    // Lines
    #[serde(default)]
    pub products: Vec<ProductLine>,

    // Money
    pub total: f64,
    #[serde(default)]
    pub payment_collected: f64,
    pub payment_due: f64,
    #[serde(default)]
    pub payment_method: Blankable<PaymentMethod>,
    #[serde(default)]
    pub payment_terms: Blankable<PaymentTerms>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_days: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neft_transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cheque_id: Option<String>,
    #[serde(default)]
    pub freightcs: f64,
    #[serde(default)]
    pub freightstatus: FreightStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_freight: Option<f64>,
    #[serde(default)]
    pub installation: f64,
    #[serde(default)]
    pub installchargesstatus: InstallChargesStatus,

    // Classification
    #[serde(default)]
    pub order_type: OrderType,
    #[serde(default)]
    pub company: Blankable<Company>,
    #[serde(default)]
    pub dispatch_from: Blankable<DispatchOrigin>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gem_order_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_person: Option<String>,
    /// Reporting manager
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<String>,

    // Status axes
    #[serde(default)]
    pub fulfilling_status: FulfillingStatus,
    #[serde(default)]
    pub dispatch_status: DispatchStatus,
    #[serde(default)]
    pub installation_status: InstallationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installation_report: Option<YesNo>,
    #[serde(default)]
    pub bill_status: BillStatus,
    #[serde(default)]
    pub payment_received: Receipt,
    #[serde(default)]
    pub completion_status: CompletionStatus,
    #[serde(default)]
    pub sostatus: SoStatus,
    #[serde(default)]
    pub stock_status: StockStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stamp: Option<Receipt>,

    // Logistics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transporter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transporter_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docket_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pi_number: Option<String>,

    // Dates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub so_date: Option<LooseDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dispatch_date: Option<LooseDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_date: Option<LooseDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_date: Option<LooseDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<LooseDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_date: Option<LooseDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fulfillment_date: Option<LooseDate>,

    // Remarks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks_by_installation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks_by_production: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks_by_accounts: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks_by_billing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks_bydispatch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_remarks: Option<String>,
}

impl Order {
    /// Record id as "sales_order:…"
    pub fn id_string(&self) -> String {
        serde_helpers::id_string(&self.id)
    }
}

/// Order as returned by list endpoints, with its creator resolved
#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    #[serde(flatten)]
    pub order: Order,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<CreatorSummary>,
}
