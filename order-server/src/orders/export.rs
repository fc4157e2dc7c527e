//! Export layout
//!
//! One row per product line. Identity columns repeat on every line; the
//! order-level money and status block is filled on the first line only.

use chrono::NaiveDate;
use shared::util::LooseDate;

use crate::db::models::Order;
use crate::spreadsheet::{Cell, Table};

pub const SHEET_NAME: &str = "Orders";

const IDENTITY: [&str; 12] = [
    "orderId",
    "soDate",
    "dispatchFrom",
    "dispatchDate",
    "name",
    "city",
    "state",
    "pinCode",
    "contactNo",
    "alterno",
    "customerEmail",
    "customername",
];

const PRODUCT: [&str; 7] = [
    "productType",
    "size",
    "spec",
    "qty",
    "unitPrice",
    "modelNos",
    "gst",
];

const ORDER_BLOCK: [&str; 37] = [
    "total",
    "paymentCollected",
    "paymentMethod",
    "paymentDue",
    "neftTransactionId",
    "chequeId",
    "freightcs",
    "freightstatus",
    "installchargesstatus",
    "gstno",
    "orderType",
    "installation",
    "installationStatus",
    "remarksByInstallation",
    "dispatchStatus",
    "salesPerson",
    "report",
    "company",
    "transporterDetails",
    "docketNo",
    "shippingAddress",
    "billingAddress",
    "invoiceNo",
    "fulfillingStatus",
    "remarksByProduction",
    "remarksByAccounts",
    "paymentReceived",
    "billNumber",
    "piNumber",
    "remarksByBilling",
    "verificationRemarks",
    "billStatus",
    "completionStatus",
    "remarks",
    "sostatus",
    "stockStatus",
    "paymentTerms",
];

const DATES: [&str; 3] = ["receiptDate", "invoiceDate", "fulfillmentDate"];

pub fn headers() -> Vec<&'static str> {
    IDENTITY
        .iter()
        .chain(PRODUCT.iter())
        .chain(ORDER_BLOCK.iter())
        .chain(DATES.iter())
        .copied()
        .collect()
}

/// `attachment; filename=…` value for a download on `day`
pub fn file_name(day: NaiveDate) -> String {
    format!("orders_{}.xlsx", day.format("%Y-%m-%d"))
}

fn date(value: &Option<LooseDate>) -> Cell {
    value.as_ref().map(|d| Cell::Text(d.day())).unwrap_or_else(Cell::blank)
}

fn opt(value: &Option<String>) -> Cell {
    Cell::Text(value.clone().unwrap_or_default())
}

fn identity(order: &Order) -> Vec<Cell> {
    vec![
        order.order_code.as_str().into(),
        date(&order.so_date),
        order.dispatch_from.to_string().into(),
        date(&order.dispatch_date),
        order.name.as_str().into(),
        order.city.as_str().into(),
        order.state.as_str().into(),
        order.pin_code.as_str().into(),
        order.contact_no.as_str().into(),
        opt(&order.alterno),
        order.customer_email.as_str().into(),
        order.customername.as_str().into(),
    ]
}

fn order_block(order: &Order) -> Vec<Cell> {
    vec![
        order.total.into(),
        order.payment_collected.into(),
        order.payment_method.to_string().into(),
        order.payment_due.into(),
        opt(&order.neft_transaction_id),
        opt(&order.cheque_id),
        order.freightcs.into(),
        order.freightstatus.as_str().into(),
        order.installchargesstatus.as_str().into(),
        opt(&order.gstno),
        order.order_type.as_str().into(),
        order.installation.into(),
        order.installation_status.as_str().into(),
        opt(&order.remarks_by_installation),
        order.dispatch_status.as_str().into(),
        opt(&order.sales_person),
        opt(&order.report),
        order.company.to_string().into(),
        opt(&order.transporter_details),
        opt(&order.docket_no),
        order.shipping_address.as_str().into(),
        order.billing_address.as_str().into(),
        opt(&order.invoice_no),
        order.fulfilling_status.as_str().into(),
        opt(&order.remarks_by_production),
        opt(&order.remarks_by_accounts),
        order.payment_received.as_str().into(),
        opt(&order.bill_number),
        opt(&order.pi_number),
        opt(&order.remarks_by_billing),
        opt(&order.verification_remarks),
        order.bill_status.as_str().into(),
        order.completion_status.as_str().into(),
        opt(&order.remarks),
        order.sostatus.as_str().into(),
        order.stock_status.as_str().into(),
        order.payment_terms.to_string().into(),
    ]
}

fn dates(order: &Order) -> Vec<Cell> {
    vec![
        date(&order.receipt_date),
        date(&order.invoice_date),
        date(&order.fulfillment_date),
    ]
}

fn placeholder_line() -> Vec<Cell> {
    vec![
        "Not Found".into(),
        "N/A".into(),
        "N/A".into(),
        0.0.into(),
        0.0.into(),
        Cell::blank(),
        Cell::blank(),
    ]
}

/// Lay out `orders` as export rows
pub fn build_table(orders: &[Order]) -> Table {
    let mut rows = Vec::new();
    for order in orders {
        let lines: Vec<Vec<Cell>> = if order.products.is_empty() {
            vec![placeholder_line()]
        } else {
            order
                .products
                .iter()
                .map(|p| {
                    vec![
                        p.product_type.as_str().into(),
                        p.size.as_str().into(),
                        p.spec.as_str().into(),
                        p.qty.into(),
                        p.unit_price.into(),
                        p.model_nos.join(", ").into(),
                        p.gst.as_str().into(),
                    ]
                })
                .collect()
        };

        for (index, line) in lines.into_iter().enumerate() {
            let mut row = identity(order);
            row.extend(line);
            if index == 0 {
                row.extend(order_block(order));
            } else {
                row.extend(std::iter::repeat_with(Cell::blank).take(ORDER_BLOCK.len()));
            }
            row.extend(dates(order));
            rows.push(row);
        }
    }
    Table {
        headers: headers(),
        rows,
    }
}
