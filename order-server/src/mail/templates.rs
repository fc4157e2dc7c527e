//! Customer email bodies

use shared::models::{DispatchStatus, ProductLine};
use shared::util::LooseDate;

use super::OutgoingMail;
use crate::db::models::Order;

fn display_date(value: Option<&LooseDate>) -> String {
    match value {
        Some(LooseDate::Date(d)) => d.format("%d/%m/%Y, %H:%M:%S").to_string(),
        Some(LooseDate::Raw(s)) if !s.trim().is_empty() => s.clone(),
        _ => "N/A".to_string(),
    }
}

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() { "N/A" } else { value }
}

fn product_lines(products: &[ProductLine]) -> String {
    products
        .iter()
        .enumerate()
        .map(|(i, p)| {
            format!(
                "{}. {} - Qty: {}, Unit Price: ₹{}, GST: {}, Brand: {}",
                i + 1,
                p.product_type,
                p.qty,
                p.unit_price,
                p.gst,
                p.brand.as_deref().unwrap_or("N/A")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn greeting(order: &Order) -> &str {
    if order.customername.trim().is_empty() {
        "Customer"
    } else {
        &order.customername
    }
}

/// Sent once the order has been saved
pub fn order_confirmation(order: &Order, signature: &str) -> OutgoingMail {
    let text = format!(
        "Dear {name},\n\n\
         Thank you for placing your order with us. Below are your order details:\n\n\
         Order ID: {code}\n\
         Order Type: {order_type}\n\
         Total: ₹{total}\n\
         Date: {date}\n\
         Dispatch From: {origin}\n\n\
         Products:\n{products}\n\n\
         Thank you for your business.\n\
         – {signature}\n",
        name = greeting(order),
        code = order.order_code,
        order_type = order.order_type,
        total = order.total,
        date = display_date(order.so_date.as_ref()),
        origin = or_na(&order.dispatch_from.to_string()),
        products = product_lines(&order.products),
    );
    OutgoingMail {
        to: order.customer_email.clone(),
        subject: format!("Order Confirmation - Order #{}", order.order_code),
        text,
    }
}

/// Sent when an edit moves the order to Dispatched or Delivered
pub fn dispatch_update(order: &Order, status: DispatchStatus, signature: &str) -> Option<OutgoingMail> {
    let (word, date_line) = match status {
        DispatchStatus::Dispatched => (
            "dispatched",
            format!("Dispatch Date: {}", display_date(order.dispatch_date.as_ref())),
        ),
        DispatchStatus::Delivered => (
            "delivered",
            format!("Delivery Date: {}", display_date(order.receipt_date.as_ref())),
        ),
        _ => return None,
    };
    let title = if status == DispatchStatus::Dispatched { "Dispatched" } else { "Delivered" };

    let text = format!(
        "Dear {name},\n\n\
         We are pleased to inform you that your order has been {word}. Below are the order details:\n\n\
         Order ID: {code}\n\
         Order Type: {order_type}\n\
         Total: ₹{total}\n\
         Dispatch From: {origin}\n\
         {date_line}\n\n\
         Transporter Details: {transporter}\n\
         Docket No: {docket}\n\n\
         Products:\n{products}\n\n\
         Thank you for your business.\n\
         – {signature}\n",
        name = greeting(order),
        code = order.order_code,
        order_type = order.order_type,
        total = order.total,
        origin = or_na(&order.dispatch_from.to_string()),
        transporter = or_na(order.transporter_details.as_deref().unwrap_or_default()),
        docket = or_na(order.docket_no.as_deref().unwrap_or_default()),
        products = product_lines(&order.products),
    );
    Some(OutgoingMail {
        to: order.customer_email.clone(),
        subject: format!("Order {title} Confirmation - Order #{}", order.order_code),
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::testing::sample_order;

    #[test]
    fn confirmation_lists_products() {
        let order = sample_order();
        let mail = order_confirmation(&order, "Promark Tech Solutions");
        assert_eq!(mail.to, order.customer_email);
        assert_eq!(mail.subject, "Order Confirmation - Order #PMTO1");
        assert!(mail.text.contains("1. IFPD - Qty: 2"));
        assert!(mail.text.ends_with("– Promark Tech Solutions\n"));
    }

    #[test]
    fn dispatch_mail_only_for_customer_facing_statuses() {
        let mut order = sample_order();
        order.docket_no = Some("DKT-889".into());
        let mail = dispatch_update(&order, DispatchStatus::Dispatched, "Sig").unwrap();
        assert_eq!(mail.subject, "Order Dispatched Confirmation - Order #PMTO1");
        assert!(mail.text.contains("Dispatch Date: N/A"));
        assert!(mail.text.contains("Docket No: DKT-889"));
        assert!(mail.text.contains("Transporter Details: N/A"));

        order.receipt_date = Some(LooseDate::parse("2025-04-02"));
        let mail = dispatch_update(&order, DispatchStatus::Delivered, "Sig").unwrap();
        assert!(mail.text.contains("has been delivered"));
        assert!(mail.text.contains("Delivery Date: 02/04/2025"));

        assert!(dispatch_update(&order, DispatchStatus::HoldByCustomer, "Sig").is_none());
    }
}
