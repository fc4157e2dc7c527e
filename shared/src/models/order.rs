//! Order request payloads
//!
//! `OrderCreate` is what the sales form posts. `OrderPatch` is the edit
//! payload: its fields are the complete set of mutable order fields, so any
//! other key in an edit request is dropped during deserialization.

use super::product::{ProductLine, ProductLineInput};
use super::status::*;
use crate::util::{Blankable, LooseDate, flexible_f64, flexible_text, nullable};
use serde::{Deserialize, Serialize};

/// Create order payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    // Customer contact
    #[serde(default)]
    pub customername: Option<String>,
    /// Contact person
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "flexible_text::deserialize")]
    pub contact_no: Option<String>,
    #[serde(default, deserialize_with = "flexible_text::deserialize")]
    pub alterno: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub gstno: Option<String>,

    // Address
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "flexible_text::deserialize")]
    pub pin_code: Option<String>,
    #[serde(default)]
    pub shipping_address: Option<String>,
    #[serde(default)]
    pub billing_address: Option<String>,
    #[serde(default)]
    pub same_address: Option<bool>,

    // Lines and amounts
    #[serde(default)]
    pub products: Vec<ProductLineInput>,
    #[serde(default, with = "flexible_f64")]
    pub total: Option<f64>,
    #[serde(default, with = "flexible_f64")]
    pub payment_due: Option<f64>,
    #[serde(default, with = "flexible_f64")]
    pub payment_collected: Option<f64>,
    #[serde(default, with = "flexible_f64")]
    pub freightcs: Option<f64>,
    #[serde(default, with = "flexible_f64")]
    pub installation: Option<f64>,
    #[serde(default)]
    pub freightstatus: Option<FreightStatus>,
    #[serde(default)]
    pub installchargesstatus: Option<InstallChargesStatus>,
    #[serde(default)]
    pub payment_method: Blankable<PaymentMethod>,
    #[serde(default)]
    pub payment_terms: Blankable<PaymentTerms>,
    #[serde(default, with = "flexible_f64")]
    pub credit_days: Option<f64>,
    #[serde(default)]
    pub neft_transaction_id: Option<String>,
    #[serde(default)]
    pub cheque_id: Option<String>,

    // Classification
    #[serde(default)]
    pub order_type: Option<OrderType>,
    #[serde(default)]
    pub company: Blankable<Company>,
    /// Raw text; checked against [`DispatchOrigin`] during validation
    #[serde(default)]
    pub dispatch_from: Option<String>,
    #[serde(default)]
    pub fulfilling_status: Option<FulfillingStatus>,
    #[serde(default)]
    pub gem_order_number: Option<String>,
    #[serde(default)]
    pub delivery_date: Option<LooseDate>,
    #[serde(default)]
    pub demo_date: Option<LooseDate>,
    #[serde(default)]
    pub so_date: Option<LooseDate>,

    // People and notes
    #[serde(default)]
    pub sales_person: Option<String>,
    /// Reporting manager
    #[serde(default)]
    pub report: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
}

/// Partial update of an order
///
/// Absent fields are left untouched. Optional fields (dates, remarks,
/// logistics references) are clearable: an explicit `null` is written
/// through and removes the stored value. Keys that are not fields of this
/// struct (order code, creator, creation time) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPatch {
    // Customer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customername: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "flexible_text::deserialize")]
    pub contact_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "flexible_text::deserialize")]
    pub alterno: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable::deserialize")]
    pub gstno: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "flexible_text::deserialize")]
    pub pin_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub same_address: Option<bool>,

    // Lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<ProductLine>>,

    // Money
    #[serde(default, skip_serializing_if = "Option::is_none", with = "flexible_f64")]
    pub total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "flexible_f64")]
    pub payment_collected: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "flexible_f64")]
    pub payment_due: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<Blankable<PaymentMethod>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_terms: Option<Blankable<PaymentTerms>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable::deserialize")]
    pub neft_transaction_id: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable::deserialize")]
    pub cheque_id: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "flexible_f64")]
    pub freightcs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freightstatus: Option<FreightStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "flexible_f64")]
    pub actual_freight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "flexible_f64")]
    pub installation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installchargesstatus: Option<InstallChargesStatus>,

    // Classification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_type: Option<OrderType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Blankable<Company>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dispatch_from: Option<Blankable<DispatchOrigin>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable::deserialize")]
    pub gem_order_number: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable::deserialize")]
    pub sales_person: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable::deserialize")]
    pub report: Option<Option<String>>,

    // Status axes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fulfilling_status: Option<FulfillingStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dispatch_status: Option<DispatchStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installation_status: Option<InstallationStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable::deserialize")]
    pub installation_report: Option<Option<YesNo>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_status: Option<BillStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_received: Option<Receipt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_status: Option<CompletionStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sostatus: Option<SoStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_status: Option<StockStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable::deserialize")]
    pub stamp: Option<Option<Receipt>>,

    // Logistics
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable::deserialize")]
    pub transporter_details: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable::deserialize")]
    pub docket_no: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable::deserialize")]
    pub invoice_no: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable::deserialize")]
    pub bill_number: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable::deserialize")]
    pub pi_number: Option<Option<String>>,

    // Dates
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable::deserialize")]
    pub so_date: Option<Option<LooseDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable::deserialize")]
    pub dispatch_date: Option<Option<LooseDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable::deserialize")]
    pub receipt_date: Option<Option<LooseDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable::deserialize")]
    pub invoice_date: Option<Option<LooseDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable::deserialize")]
    pub delivery_date: Option<Option<LooseDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable::deserialize")]
    pub demo_date: Option<Option<LooseDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable::deserialize")]
    pub fulfillment_date: Option<Option<LooseDate>>,

    // Remarks
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable::deserialize")]
    pub remarks: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable::deserialize")]
    pub remarks_by_installation: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable::deserialize")]
    pub remarks_by_production: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable::deserialize")]
    pub remarks_by_accounts: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable::deserialize")]
    pub remarks_by_billing: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable::deserialize")]
    pub remarks_bydispatch: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable::deserialize")]
    pub verification_remarks: Option<Option<String>>,
}

impl OrderPatch {
    /// True when the request named no mutable field at all
    pub fn is_empty(&self) -> bool {
        self == &OrderPatch::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::GstRate;
    use serde_json::json;

    #[test]
    fn patch_ignores_fields_outside_the_allow_list() {
        let patch: OrderPatch = serde_json::from_value(json!({
            "orderId": "PMTO999",
            "createdBy": "user:mallory",
            "createdAt": "2020-01-01",
            "remarks": "call before delivery"
        }))
        .unwrap();

        assert_eq!(patch.remarks, Some(Some("call before delivery".to_string())));
        let written = serde_json::to_value(&patch).unwrap();
        assert_eq!(written, json!({ "remarks": "call before delivery" }));
    }

    #[test]
    fn patch_coerces_date_fields_and_keeps_garbage() {
        let patch: OrderPatch = serde_json::from_value(json!({
            "dispatchDate": "2025-04-02",
            "receiptDate": "when the truck arrives"
        }))
        .unwrap();

        assert!(matches!(patch.dispatch_date, Some(Some(LooseDate::Date(_)))));
        assert_eq!(
            patch.receipt_date,
            Some(Some(LooseDate::Raw("when the truck arrives".into())))
        );
    }

    #[test]
    fn patch_null_clears_optional_fields() {
        let patch: OrderPatch = serde_json::from_value(json!({
            "dispatchDate": null,
            "docketNo": null,
            "stamp": null,
            "remarks": "redelivered"
        }))
        .unwrap();

        assert_eq!(patch.dispatch_date, Some(None));
        assert_eq!(patch.docket_no, Some(None));
        assert_eq!(patch.stamp, Some(None));
        assert_eq!(patch.invoice_date, None);

        let written = serde_json::to_value(&patch).unwrap();
        assert_eq!(
            written,
            json!({ "docketNo": null, "stamp": null, "dispatchDate": null, "remarks": "redelivered" })
        );
    }

    #[test]
    fn patch_rejects_unknown_status_values() {
        let result = serde_json::from_value::<OrderPatch>(json!({ "dispatchStatus": "Lost" }));
        assert!(result.is_err());
    }

    #[test]
    fn patch_blank_choice_clears() {
        let patch: OrderPatch = serde_json::from_value(json!({ "paymentTerms": "" })).unwrap();
        assert_eq!(patch.payment_terms, Some(Blankable::Blank));
        assert!(!patch.is_empty());
        assert!(OrderPatch::default().is_empty());
    }

    #[test]
    fn patch_accepts_numeric_strings_in_product_lines() {
        let patch: OrderPatch = serde_json::from_value(json!({
            "products": [{
                "productType": "IFPD",
                "qty": "2",
                "unitPrice": "100",
                "gst": "18",
                "warranty": "1 Year"
            }]
        }))
        .unwrap();

        let lines = patch.products.unwrap();
        assert_eq!(lines[0].qty, 2.0);
        assert_eq!(lines[0].unit_price, 100.0);
        assert_eq!(lines[0].gst, GstRate::Eighteen);

        let bad = serde_json::from_value::<OrderPatch>(json!({
            "products": [{ "productType": "IFPD", "qty": "two", "unitPrice": 1, "gst": 18 }]
        }));
        assert!(bad.is_err());
    }

    #[test]
    fn create_accepts_numeric_strings() {
        let create: OrderCreate = serde_json::from_value(json!({
            "contactNo": 9876543210u64,
            "pinCode": "110001",
            "freightcs": "250",
            "products": [{ "productType": "IFPD", "qty": 1, "unitPrice": "10", "gst": "18", "warranty": "1 Year" }]
        }))
        .unwrap();

        assert_eq!(create.contact_no.as_deref(), Some("9876543210"));
        assert_eq!(create.freightcs, Some(250.0));
        assert_eq!(create.products.len(), 1);
        assert!(create.payment_terms.is_blank());
    }
}
