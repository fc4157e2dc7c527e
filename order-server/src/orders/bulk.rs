//! Bulk import row mapping
//!
//! Each spreadsheet row becomes one order with a single product line. Column
//! headers follow the upload template handed out to sales staff.

use chrono::{DateTime, Utc};
use shared::error::{AppError, ErrorCode};
use shared::models::*;
use shared::util::{Blankable, LooseDate};
use std::str::FromStr;

use super::money::{self, Amount, Charges};
use super::validation::parse_dispatch_origin;
use crate::db::models::Order;
use crate::spreadsheet::SheetRow;

pub mod columns {
    pub const SO_DATE: &str = "SO Date";
    pub const DISPATCH_FROM: &str = "Dispatch From";
    pub const CONTACT_PERSON: &str = "Contact Person Name";
    pub const CITY: &str = "City";
    pub const STATE: &str = "State";
    pub const PIN_CODE: &str = "Pin Code";
    pub const CONTACT_NO: &str = "Contact No";
    pub const ALTERNATE_NO: &str = "Alternate No";
    pub const CUSTOMER_EMAIL: &str = "Customer Email";
    pub const CUSTOMER_NAME: &str = "Customer Name";
    pub const PRODUCT_TYPE: &str = "Product Type";
    pub const SIZE: &str = "Size";
    pub const SPEC: &str = "Specification";
    pub const QUANTITY: &str = "Quantity";
    pub const UNIT_PRICE: &str = "Unit Price";
    pub const GST: &str = "GST";
    pub const MODEL_NOS: &str = "Model Nos";
    pub const BRAND: &str = "Brand";
    pub const WARRANTY: &str = "Warranty";
    pub const GST_NO: &str = "GST No";
    pub const FREIGHT: &str = "Freight Charges";
    pub const FREIGHT_STATUS: &str = "Freight Status";
    pub const INSTALLATION: &str = "Installation Charges";
    pub const INSTALLATION_STATUS: &str = "Installation Charges Status";
    pub const REPORTING_MANAGER: &str = "Reporting Manager";
    pub const SALES_PERSON: &str = "Sales Person";
    pub const COMPANY: &str = "Company";
    pub const ORDER_TYPE: &str = "Order Type";
    pub const SHIPPING_ADDRESS: &str = "Shipping Address";
    pub const BILLING_ADDRESS: &str = "Billing Address";
    pub const SAME_ADDRESS: &str = "Same Address";
    pub const PAYMENT_COLLECTED: &str = "Payment Collected";
    pub const PAYMENT_METHOD: &str = "Payment Method";
    pub const NEFT_ID: &str = "NEFT Transaction ID";
    pub const CHEQUE_ID: &str = "Cheque ID";
    pub const REMARKS: &str = "Remarks";
    pub const GEM_ORDER_NUMBER: &str = "GEM Order Number";
    pub const DELIVERY_DATE: &str = "Delivery Date";
    pub const PAYMENT_TERMS: &str = "Payment Terms";
}

use columns as col;

fn invalid_row(row: &SheetRow, detail: impl Into<String>) -> AppError {
    AppError::with_message(
        ErrorCode::BulkImportFailed,
        format!("Invalid product data in row {}", row.number),
    )
    .with_detail("row", row.number as u64)
    .with_detail("reason", detail.into())
}

fn text(row: &SheetRow, header: &str) -> String {
    row.get(header).unwrap_or_default().to_string()
}

fn opt_text(row: &SheetRow, header: &str) -> Option<String> {
    row.get(header).map(str::to_string)
}

fn number(row: &SheetRow, header: &str) -> Result<f64, AppError> {
    match row.get(header) {
        None => Ok(0.0),
        Some(raw) => raw
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| invalid_row(row, format!("{header} must be a number"))),
    }
}

fn choice<T: FromStr>(row: &SheetRow, header: &str) -> Result<Option<T>, AppError> {
    row.get(header)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|_| invalid_row(row, format!("Invalid {header} value: '{raw}'")))
        })
        .transpose()
}

fn blankable<T: FromStr>(row: &SheetRow, header: &str) -> Result<Blankable<T>, AppError> {
    Ok(choice::<T>(row, header)?.map(Blankable::Value).unwrap_or_default())
}

/// Warranty used when the row leaves it empty
pub fn default_warranty(order_type: OrderType, product_type: &str, brand: Option<&str>) -> &'static str {
    if order_type == OrderType::B2G {
        "As Per Tender"
    } else if product_type == "IFPD" && brand == Some("Promark") {
        "3 Years"
    } else {
        "1 Year"
    }
}

fn product_line(row: &SheetRow, order_type: OrderType) -> Result<ProductLine, AppError> {
    let product_type = opt_text(row, col::PRODUCT_TYPE);
    let brand = opt_text(row, col::BRAND);
    let warranty = opt_text(row, col::WARRANTY).or_else(|| {
        product_type
            .as_deref()
            .map(|pt| default_warranty(order_type, pt, brand.as_deref()).to_string())
    });
    let model_nos: Vec<String> = row
        .get(col::MODEL_NOS)
        .map(|raw| {
            raw.split(',')
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let input = ProductLineInput {
        product_type,
        size: opt_text(row, col::SIZE),
        spec: opt_text(row, col::SPEC),
        qty: Some(number(row, col::QUANTITY)?),
        unit_price: Some(number(row, col::UNIT_PRICE)?),
        gst: Some(row.get(col::GST).unwrap_or("18").to_string()),
        model_nos: Some(model_nos),
        brand,
        warranty,
    };
    let line = input
        .into_line(1)
        .map_err(|e| invalid_row(row, e.to_string()))?;

    if line.product_type == "IFPD" && (line.model_nos.is_empty() || line.brand.is_none()) {
        return Err(invalid_row(
            row,
            "Model Numbers and Brand are required for IFPD products",
        ));
    }
    Ok(line)
}

/// Map one sheet row to an order draft. Code and sequence are filled in
/// after the whole batch has validated.
pub fn map_row(row: &SheetRow, created_by: &str, now: DateTime<Utc>) -> Result<Order, AppError> {
    let order_type: OrderType = choice(row, col::ORDER_TYPE)?.unwrap_or_default();
    let line = product_line(row, order_type)?;

    let dispatch_from = parse_dispatch_origin(row.get(col::DISPATCH_FROM))
        .map_err(|_| invalid_row(row, "Invalid dispatchFrom value"))?;

    let freightcs = number(row, col::FREIGHT)?;
    let installation = number(row, col::INSTALLATION)?;
    let payment_collected = number(row, col::PAYMENT_COLLECTED)?;
    let products = vec![line];
    let totals = money::settle(
        &products,
        Charges {
            freight: freightcs,
            installation,
            collected: payment_collected,
        },
        Amount::Computed,
        Amount::Computed,
    );

    let so_date = row
        .get(col::SO_DATE)
        .map(LooseDate::parse)
        .unwrap_or(LooseDate::Date(now));
    let company = match choice::<Company>(row, col::COMPANY)? {
        Some(c) => Blankable::Value(c),
        None => Blankable::Value(Company::Promark),
    };

    Ok(Order {
        id: None,
        order_code: String::new(),
        sequence: 0,
        created_at: now,
        created_by: created_by.to_string(),
        updated_at: None,
        customername: text(row, col::CUSTOMER_NAME),
        name: text(row, col::CONTACT_PERSON),
        contact_no: text(row, col::CONTACT_NO),
        alterno: opt_text(row, col::ALTERNATE_NO),
        customer_email: text(row, col::CUSTOMER_EMAIL),
        gstno: opt_text(row, col::GST_NO),
        city: text(row, col::CITY),
        state: text(row, col::STATE),
        pin_code: text(row, col::PIN_CODE),
        shipping_address: text(row, col::SHIPPING_ADDRESS),
        billing_address: text(row, col::BILLING_ADDRESS),
        same_address: row.get(col::SAME_ADDRESS) == Some("Yes"),
        products,
        total: totals.total,
        payment_collected,
        payment_due: totals.payment_due,
        payment_method: blankable(row, col::PAYMENT_METHOD)?,
        payment_terms: blankable(row, col::PAYMENT_TERMS)?,
        credit_days: None,
        neft_transaction_id: opt_text(row, col::NEFT_ID),
        cheque_id: opt_text(row, col::CHEQUE_ID),
        freightcs,
        freightstatus: choice(row, col::FREIGHT_STATUS)?.unwrap_or_default(),
        actual_freight: None,
        installation,
        installchargesstatus: choice(row, col::INSTALLATION_STATUS)?.unwrap_or_default(),
        order_type,
        company,
        dispatch_from,
        gem_order_number: opt_text(row, col::GEM_ORDER_NUMBER),
        sales_person: opt_text(row, col::SALES_PERSON),
        report: opt_text(row, col::REPORTING_MANAGER),
        fulfilling_status: FulfillingStatus::default(),
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
        so_date: Some(so_date),
        dispatch_date: None,
        receipt_date: None,
        invoice_date: None,
        delivery_date: row.get(col::DELIVERY_DATE).map(LooseDate::parse),
        demo_date: None,
        fulfillment_date: None,
        remarks: opt_text(row, col::REMARKS),
        remarks_by_installation: None,
        remarks_by_production: None,
        remarks_by_accounts: None,
        remarks_by_billing: None,
        remarks_bydispatch: None,
        verification_remarks: None,
    })
}

/// Validate every row before anything is written; the first bad row aborts
pub fn map_rows(rows: &[SheetRow], created_by: &str, now: DateTime<Utc>) -> Result<Vec<Order>, AppError> {
    if rows.is_empty() {
        return Err(AppError::new(ErrorCode::EmptyImport));
    }
    rows.iter().map(|row| map_row(row, created_by, now)).collect()
}
