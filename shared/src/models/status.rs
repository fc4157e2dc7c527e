//! Order classification and status axes
//!
//! Every axis is a closed set of display strings. The variants serialize to
//! exactly the text the frontend shows, so stored documents stay readable.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raised when text does not name a variant of a wire enum
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {kind} value: '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($wire => Ok($name::$variant),)+
                    other => Err(UnknownVariant {
                        kind: $label,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

wire_enum! {
    /// Commercial channel of the order
    OrderType ("orderType") {
        B2G => "B2G",
        B2C => "B2C",
        B2B => "B2B",
        Demo => "Demo",
        Replacement => "Replacement",
        StockOut => "Stock Out",
    }
}

impl Default for OrderType {
    fn default() -> Self {
        OrderType::B2C
    }
}

wire_enum! {
    /// Warehouse the goods leave from; Morinda is the in-house plant
    DispatchOrigin ("dispatchFrom") {
        Patna => "Patna",
        Bareilly => "Bareilly",
        Ranchi => "Ranchi",
        Morinda => "Morinda",
        Lucknow => "Lucknow",
        Delhi => "Delhi",
        Jaipur => "Jaipur",
        Rajasthan => "Rajasthan",
    }
}

impl DispatchOrigin {
    /// Orders from the plant must still be manufactured
    pub fn is_plant(&self) -> bool {
        matches!(self, DispatchOrigin::Morinda)
    }
}

wire_enum! {
    Company ("company") {
        Promark => "Promark",
        Foxmate => "Foxmate",
        Promine => "Promine",
        Primus => "Primus",
        LeadSystems => "Lead Systems Incorporatio",
    }
}

wire_enum! {
    PaymentMethod ("paymentMethod") {
        Cash => "Cash",
        Neft => "NEFT",
        Rtgs => "RTGS",
        Cheque => "Cheque",
    }
}

wire_enum! {
    PaymentTerms ("paymentTerms") {
        FullAdvance => "100% Advance",
        PartialAdvance => "Partial Advance",
        Credit => "Credit",
    }
}

wire_enum! {
    FreightStatus ("freightstatus") {
        SelfPickup => "Self-Pickup",
        ToPay => "To Pay",
        Including => "Including",
        Extra => "Extra",
    }
}

impl Default for FreightStatus {
    fn default() -> Self {
        FreightStatus::Extra
    }
}

wire_enum! {
    InstallChargesStatus ("installchargesstatus") {
        ToPay => "To Pay",
        Including => "Including",
        Extra => "Extra",
    }
}

impl Default for InstallChargesStatus {
    fn default() -> Self {
        InstallChargesStatus::Extra
    }
}

wire_enum! {
    FulfillingStatus ("fulfillingStatus") {
        Pending => "Pending",
        UnderProcess => "Under Process",
        PartialDispatch => "Partial Dispatch",
        Fulfilled => "Fulfilled",
    }
}

impl Default for FulfillingStatus {
    fn default() -> Self {
        FulfillingStatus::Pending
    }
}

wire_enum! {
    DispatchStatus ("dispatchStatus") {
        NotDispatched => "Not Dispatched",
        DocketAwaited => "Docket Awaited Dispatched",
        HoldBySalesperson => "Hold by Salesperson",
        HoldByCustomer => "Hold by Customer",
        Cancelled => "Order Cancelled",
        Dispatched => "Dispatched",
        Delivered => "Delivered",
    }
}

impl Default for DispatchStatus {
    fn default() -> Self {
        DispatchStatus::NotDispatched
    }
}

impl DispatchStatus {
    /// Statuses the customer is told about by email
    pub fn notifies_customer(&self) -> bool {
        matches!(self, DispatchStatus::Dispatched | DispatchStatus::Delivered)
    }
}

wire_enum! {
    InstallationStatus ("installationStatus") {
        Pending => "Pending",
        InProgress => "In Progress",
        Failed => "Failed",
        Completed => "Completed",
        HoldBySalesperson => "Hold by Salesperson",
        HoldByCustomer => "Hold by Customer",
        SiteNotReady => "Site Not Ready",
    }
}

impl Default for InstallationStatus {
    fn default() -> Self {
        InstallationStatus::Pending
    }
}

wire_enum! {
    /// Whether the installation report has been filed
    YesNo ("installationReport") {
        Yes => "Yes",
        No => "No",
    }
}

wire_enum! {
    BillStatus ("billStatus") {
        Pending => "Pending",
        UnderBilling => "Under Billing",
        BillingComplete => "Billing Complete",
    }
}

impl Default for BillStatus {
    fn default() -> Self {
        BillStatus::Pending
    }
}

wire_enum! {
    /// Used both for payment receipt and for the delivery-challan stamp
    Receipt ("receipt") {
        NotReceived => "Not Received",
        Received => "Received",
    }
}

impl Default for Receipt {
    fn default() -> Self {
        Receipt::NotReceived
    }
}

wire_enum! {
    CompletionStatus ("completionStatus") {
        InProgress => "In Progress",
        Complete => "Complete",
    }
}

impl Default for CompletionStatus {
    fn default() -> Self {
        CompletionStatus::InProgress
    }
}

wire_enum! {
    /// Sales-order approval state
    SoStatus ("sostatus") {
        PendingApproval => "Pending for Approval",
        AccountsApproved => "Accounts Approved",
        Approved => "Approved",
    }
}

impl Default for SoStatus {
    fn default() -> Self {
        SoStatus::PendingApproval
    }
}

wire_enum! {
    StockStatus ("stockStatus") {
        InStock => "In Stock",
        NotInStock => "Not in Stock",
        PartialStock => "Partial Stock",
    }
}

impl Default for StockStatus {
    fn default() -> Self {
        StockStatus::InStock
    }
}

wire_enum! {
    /// Fixed set of user roles
    Role ("role") {
        Production => "Production",
        Sales => "Sales",
        Installation => "Installation",
        Finish => "Finish",
        Accounts => "Accounts",
        Admin => "Admin",
        SuperAdmin => "SuperAdmin",
        Verification => "Verification",
        Bill => "Bill",
        ProductionApproval => "ProductionApproval",
    }
}

impl Role {
    /// Sales users only see and delete what they created
    pub fn is_owner_scoped(&self) -> bool {
        matches!(self, Role::Sales)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_display_text() {
        assert_eq!(OrderType::StockOut.as_str(), "Stock Out");
        assert_eq!(PaymentTerms::FullAdvance.to_string(), "100% Advance");
        assert_eq!(
            serde_json::to_string(&DispatchStatus::DocketAwaited).unwrap(),
            "\"Docket Awaited Dispatched\""
        );
        let s: SoStatus = serde_json::from_str("\"Accounts Approved\"").unwrap();
        assert_eq!(s, SoStatus::AccountsApproved);
    }

    #[test]
    fn unknown_values_name_the_axis() {
        let err = "Mumbai".parse::<DispatchOrigin>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid dispatchFrom value: 'Mumbai'");
        assert!(serde_json::from_str::<Role>("\"Intern\"").is_err());
    }

    #[test]
    fn defaults() {
        assert_eq!(OrderType::default(), OrderType::B2C);
        assert_eq!(DispatchStatus::default(), DispatchStatus::NotDispatched);
        assert_eq!(SoStatus::default(), SoStatus::PendingApproval);
        assert_eq!(FreightStatus::default(), FreightStatus::Extra);
        assert_eq!(Receipt::default(), Receipt::NotReceived);
    }

    #[test]
    fn only_plant_is_morinda() {
        let plants: Vec<_> = DispatchOrigin::ALL.iter().filter(|o| o.is_plant()).collect();
        assert_eq!(plants, vec![&DispatchOrigin::Morinda]);
    }
}
