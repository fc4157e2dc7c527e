//! Create-order validation
//!
//! Turns an [`OrderCreate`] body into a fully typed [`Order`] draft. Checks run
//! in a fixed order and the first failure is reported.

use chrono::{DateTime, Utc};
use shared::error::{AppError, ErrorCode};
use shared::models::*;
use shared::util::{Blankable, LooseDate};

use super::hooks;
use super::money::{self, Amount, Charges};
use crate::db::models::Order;
use crate::utils::validation::{is_email, is_phone, is_pin_code, non_blank};

fn required(field: &str, message: &str) -> AppError {
    AppError::with_message(ErrorCode::RequiredField, message).with_detail("field", field)
}

fn malformed(field: &str, message: impl Into<String>) -> AppError {
    AppError::with_message(ErrorCode::InvalidFormat, message).with_detail("field", field)
}

pub(crate) fn product_error(err: ProductLineError) -> AppError {
    AppError::with_message(ErrorCode::InvalidProductLine, err.to_string())
        .with_detail("field", "products")
}

fn owned(value: &Option<String>) -> Option<String> {
    non_blank(value).map(str::to_string)
}

/// Dispatch origin text; empty means "not decided yet"
pub(crate) fn parse_dispatch_origin(raw: Option<&str>) -> Result<Blankable<DispatchOrigin>, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(Blankable::Blank),
        Some(text) => text
            .parse::<DispatchOrigin>()
            .map(Blankable::Value)
            .map_err(|_| malformed("dispatchFrom", "Invalid dispatchFrom value")),
    }
}

/// Plant orders still need manufacturing; anything else ships from stock
pub(crate) fn default_fulfilling_status(origin: &Blankable<DispatchOrigin>) -> FulfillingStatus {
    match origin.value() {
        Some(o) if o.is_plant() => FulfillingStatus::Pending,
        _ => FulfillingStatus::Fulfilled,
    }
}

/// Validate a create request and build the order it describes.
///
/// The result carries no code or sequence yet; those are minted on save.
pub fn prepare_create(input: OrderCreate, created_by: &str, now: DateTime<Utc>) -> Result<Order, AppError> {
    let (Some(customername), Some(name), Some(contact_no), Some(customer_email)) = (
        owned(&input.customername),
        owned(&input.name),
        owned(&input.contact_no),
        owned(&input.customer_email),
    ) else {
        return Err(required("customer", "Missing required customer details"));
    };

    if !is_phone(&contact_no) {
        return Err(malformed("contactNo", "Contact number must be exactly 10 digits"));
    }
    let alterno = owned(&input.alterno);
    if let Some(alt) = &alterno
        && !is_phone(alt)
    {
        return Err(malformed(
            "alterno",
            "Alternate contact number must be exactly 10 digits",
        ));
    }
    if !is_email(&customer_email) {
        return Err(malformed("customerEmail", "Invalid email address"));
    }

    let (Some(state), Some(city), Some(pin_code)) = (
        owned(&input.state),
        owned(&input.city),
        owned(&input.pin_code),
    ) else {
        return Err(required("address", "Missing required address details"));
    };
    if !is_pin_code(&pin_code) {
        return Err(malformed("pinCode", "Pin Code must be exactly 6 digits"));
    }

    let (Some(shipping_address), Some(billing_address)) = (
        owned(&input.shipping_address),
        owned(&input.billing_address),
    ) else {
        return Err(required("address", "Missing billing or shipping address"));
    };

    let order_type = input.order_type.unwrap_or_default();
    let gem_order_number = owned(&input.gem_order_number);
    if order_type == OrderType::B2G && gem_order_number.is_none() {
        return Err(required(
            "gemOrderNumber",
            "Missing GEM Order Number for B2G orders",
        ));
    }
    let demo_date = input.demo_date.filter(|d| !d.is_empty());
    if order_type == OrderType::Demo && demo_date.is_none() {
        return Err(required("demoDate", "Missing Demo Date for Demo orders"));
    }
    if order_type != OrderType::Demo && input.payment_terms.is_blank() {
        return Err(required(
            "paymentTerms",
            "Payment Terms is required for non-Demo orders",
        ));
    }

    let dispatch_from = parse_dispatch_origin(input.dispatch_from.as_deref())?;

    if input.products.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::OrderEmpty,
            "At least one product is required",
        )
        .with_detail("field", "products"));
    }
    let products = input
        .products
        .into_iter()
        .enumerate()
        .map(|(i, p)| p.into_line(i + 1))
        .collect::<Result<Vec<_>, _>>()
        .map_err(product_error)?;

    let freightcs = input.freightcs.unwrap_or(0.0);
    let installation = input.installation.unwrap_or(0.0);
    let payment_collected = input.payment_collected.unwrap_or(0.0);
    let totals = money::settle(
        &products,
        Charges {
            freight: freightcs,
            installation,
            collected: payment_collected,
        },
        Amount::from_override(input.total),
        Amount::from_override(input.payment_due),
    );

    let fulfilling_status = input
        .fulfilling_status
        .unwrap_or_else(|| default_fulfilling_status(&dispatch_from));

    let mut order = Order {
        id: None,
        order_code: String::new(),
        sequence: 0,
        created_at: now,
        created_by: created_by.to_string(),
        updated_at: None,
        customername,
        name,
        contact_no,
        alterno,
        customer_email,
        gstno: owned(&input.gstno),
        city,
        state,
        pin_code,
        shipping_address,
        billing_address,
        same_address: input.same_address.unwrap_or(false),
        products,
        total: totals.total,
        payment_collected,
        payment_due: totals.payment_due,
        payment_method: input.payment_method,
        payment_terms: input.payment_terms,
        credit_days: input.credit_days,
        neft_transaction_id: owned(&input.neft_transaction_id),
        cheque_id: owned(&input.cheque_id),
        freightcs,
        freightstatus: input.freightstatus.unwrap_or_default(),
        actual_freight: None,
        installation,
        installchargesstatus: input.installchargesstatus.unwrap_or_default(),
        order_type,
        company: input.company,
        dispatch_from,
        gem_order_number,
        sales_person: owned(&input.sales_person),
        report: owned(&input.report),
        fulfilling_status,
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
        so_date: Some(input.so_date.filter(|d| !d.is_empty()).unwrap_or(LooseDate::Date(now))),
        dispatch_date: None,
        receipt_date: None,
        invoice_date: None,
        delivery_date: input.delivery_date.filter(|d| !d.is_empty()),
        demo_date,
        fulfillment_date: None,
        remarks: owned(&input.remarks),
        remarks_by_installation: None,
        remarks_by_production: None,
        remarks_by_accounts: None,
        remarks_by_billing: None,
        remarks_bydispatch: None,
        verification_remarks: None,
    };
    hooks::after_create(&mut order, now);
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body() -> serde_json::Value {
        json!({
            "customername": "Acme Schools",
            "name": "R. Sharma",
            "contactNo": "9876543210",
            "customerEmail": "buyer@acme.in",
            "city": "Patna",
            "state": "Bihar",
            "pinCode": "800001",
            "shippingAddress": "Plot 4, Boring Road",
            "billingAddress": "Plot 4, Boring Road",
            "paymentTerms": "Credit",
            "dispatchFrom": "Patna",
            "products": [
                { "productType": "IFPD", "qty": 2, "unitPrice": 100, "gst": "18", "warranty": "3 Years" },
                { "productType": "Stand", "qty": 1, "unitPrice": 50, "gst": "including", "warranty": "1 Year" }
            ]
        })
    }

    fn prepare(value: serde_json::Value) -> Result<Order, AppError> {
        let input: OrderCreate = serde_json::from_value(value).unwrap();
        prepare_create(input, "user:alice", Utc::now())
    }

    fn with(mut value: serde_json::Value, key: &str, v: serde_json::Value) -> serde_json::Value {
        value[key] = v;
        value
    }

    #[test]
    fn valid_body_computes_money_and_defaults() {
        let order = prepare(body()).unwrap();
        assert_eq!(order.total, 286.0);
        assert_eq!(order.payment_due, 286.0);
        assert_eq!(order.order_type, OrderType::B2C);
        assert_eq!(order.created_by, "user:alice");
        assert_eq!(order.fulfilling_status, FulfillingStatus::Fulfilled);
        assert_eq!(order.completion_status, CompletionStatus::Complete);
        assert!(order.fulfillment_date.is_some());
        assert!(order.so_date.is_some());
        assert_eq!(order.products[0].size, "N/A");
    }

    #[test]
    fn plant_orders_start_pending() {
        let order = prepare(with(body(), "dispatchFrom", json!("Morinda"))).unwrap();
        assert_eq!(order.fulfilling_status, FulfillingStatus::Pending);
        assert_eq!(order.completion_status, CompletionStatus::InProgress);
        assert!(order.fulfillment_date.is_none());
    }

    #[test]
    fn caller_status_wins_over_default() {
        let value = with(body(), "fulfillingStatus", json!("Under Process"));
        let order = prepare(value).unwrap();
        assert_eq!(order.fulfilling_status, FulfillingStatus::UnderProcess);
    }

    #[test]
    fn rejects_bad_contact_fields() {
        let err = prepare(with(body(), "contactNo", json!("12345"))).unwrap_err();
        assert_eq!(err.message, "Contact number must be exactly 10 digits");

        let err = prepare(with(body(), "alterno", json!("98765"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);

        let err = prepare(with(body(), "customerEmail", json!("not-an-email"))).unwrap_err();
        assert_eq!(err.message, "Invalid email address");

        let err = prepare(with(body(), "pinCode", json!("8000"))).unwrap_err();
        assert_eq!(err.message, "Pin Code must be exactly 6 digits");

        let err = prepare(with(body(), "customername", json!(""))).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
    }

    #[test]
    fn rejects_classification_gaps() {
        let err = prepare(with(body(), "orderType", json!("B2G"))).unwrap_err();
        assert!(err.message.contains("GEM"));

        let demo = with(with(body(), "orderType", json!("Demo")), "paymentTerms", json!(""));
        let err = prepare(demo.clone()).unwrap_err();
        assert!(err.message.contains("Demo Date"));
        assert!(prepare(with(demo, "demoDate", json!("2025-05-01"))).is_ok());

        let err = prepare(with(body(), "paymentTerms", json!(""))).unwrap_err();
        assert!(err.message.contains("Payment Terms"));

        let err = prepare(with(body(), "dispatchFrom", json!("Mumbai"))).unwrap_err();
        assert_eq!(err.message, "Invalid dispatchFrom value");
    }

    #[test]
    fn rejects_bad_products() {
        let err = prepare(with(body(), "products", json!([]))).unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderEmpty);

        let lines = json!([{ "productType": "IFPD", "qty": 0, "unitPrice": 1, "gst": "18", "warranty": "1 Year" }]);
        let err = prepare(with(body(), "products", lines)).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidProductLine);

        let lines = json!([{ "productType": "IFPD", "qty": 1, "unitPrice": 1, "gst": "12", "warranty": "1 Year" }]);
        assert!(prepare(with(body(), "products", lines)).is_err());

        let lines = json!([{ "productType": "IFPD", "qty": 1, "unitPrice": 1, "gst": "18" }]);
        assert!(prepare(with(body(), "products", lines)).is_err());
    }

    #[test]
    fn overridden_total_drives_due() {
        let value = with(with(body(), "total", json!(1000)), "paymentCollected", json!("400"));
        let order = prepare(value).unwrap();
        assert_eq!(order.total, 1000.0);
        assert_eq!(order.payment_due, 600.0);
    }
}
