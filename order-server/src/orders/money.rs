//! Money calculation utilities using rust_decimal for precision
//!
//! Amounts are summed as `Decimal` and converted to `f64` (2 places, half-up)
//! only for storage and serialization.

use rust_decimal::prelude::*;
use shared::models::ProductLine;

const DECIMAL_PLACES: u32 = 2;

#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// A stored amount: derived from the lines, or supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Amount {
    Computed,
    Overridden(f64),
}

impl Amount {
    /// Caller overrides must be finite numbers; anything else falls back to derivation
    pub fn from_override(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() => Amount::Overridden(v),
            _ => Amount::Computed,
        }
    }

    fn resolve(self, computed: Decimal) -> Decimal {
        match self {
            Amount::Computed => computed,
            Amount::Overridden(v) => to_decimal(v),
        }
    }
}

/// `qty * unitPrice * (1 + gst/100)`; tax-included lines add nothing
pub fn line_total(line: &ProductLine) -> Decimal {
    let base = to_decimal(line.qty) * to_decimal(line.unit_price);
    let rate = Decimal::from(line.gst.percent());
    base + base * rate / Decimal::ONE_HUNDRED
}

/// Inputs needed to settle an order's money fields
#[derive(Debug, Clone, Copy, Default)]
pub struct Charges {
    pub freight: f64,
    pub installation: f64,
    pub collected: f64,
}

/// Resolved money fields
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub total: f64,
    pub payment_due: f64,
}

/// Resolve `total` and `paymentDue` once, at write time.
///
/// `paymentDue` is derived from the resolved total, so an overridden total
/// still yields a consistent balance.
pub fn settle(lines: &[ProductLine], charges: Charges, total: Amount, payment_due: Amount) -> Totals {
    let computed_total = lines.iter().map(line_total).sum::<Decimal>()
        + to_decimal(charges.freight)
        + to_decimal(charges.installation);
    let total = total.resolve(computed_total);
    let due = payment_due.resolve(total - to_decimal(charges.collected));
    Totals {
        total: to_f64(total),
        payment_due: to_f64(due),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::GstRate;

    fn line(qty: f64, unit_price: f64, gst: GstRate) -> ProductLine {
        ProductLine {
            product_type: "IFPD".into(),
            size: "N/A".into(),
            spec: "N/A".into(),
            qty,
            unit_price,
            gst,
            model_nos: vec![],
            brand: None,
            warranty: "1 Year".into(),
        }
    }

    #[test]
    fn mixed_gst_scenario_totals_286() {
        let lines = [
            line(2.0, 100.0, GstRate::Eighteen),
            line(1.0, 50.0, GstRate::Including),
        ];
        let totals = settle(&lines, Charges::default(), Amount::Computed, Amount::Computed);
        assert_eq!(totals.total, 286.0);
        assert_eq!(totals.payment_due, 286.0);
    }

    #[test]
    fn freight_installation_and_collection() {
        let lines = [line(3.0, 33.33, GstRate::TwentyEight)];
        let charges = Charges {
            freight: 150.0,
            installation: 99.99,
            collected: 100.0,
        };
        let totals = settle(&lines, charges, Amount::Computed, Amount::Computed);
        // 99.99 * 1.28 = 127.9872
        assert_eq!(totals.total, 377.98);
        assert_eq!(totals.payment_due, 277.98);
    }

    #[test]
    fn due_tracks_total_for_any_gst_mix() {
        for gst in [GstRate::Eighteen, GstRate::TwentyEight, GstRate::Including] {
            for collected in [0.0, 10.5, 1000.0] {
                let lines = [line(1.5, 19.99, gst), line(4.0, 0.1, GstRate::Eighteen)];
                let charges = Charges {
                    collected,
                    ..Charges::default()
                };
                let totals = settle(&lines, charges, Amount::Computed, Amount::Computed);
                assert_eq!(
                    to_decimal(totals.payment_due),
                    to_decimal(totals.total) - to_decimal(collected)
                );
            }
        }
    }

    #[test]
    fn overrides_win() {
        let lines = [line(1.0, 100.0, GstRate::Eighteen)];
        let charges = Charges {
            collected: 50.0,
            ..Charges::default()
        };
        let totals = settle(&lines, charges, Amount::Overridden(500.0), Amount::Computed);
        assert_eq!(totals.total, 500.0);
        assert_eq!(totals.payment_due, 450.0);

        let totals = settle(&lines, charges, Amount::Computed, Amount::Overridden(0.0));
        assert_eq!(totals.total, 118.0);
        assert_eq!(totals.payment_due, 0.0);
    }

    #[test]
    fn non_finite_override_is_ignored() {
        assert_eq!(Amount::from_override(Some(f64::NAN)), Amount::Computed);
        assert_eq!(Amount::from_override(None), Amount::Computed);
        assert_eq!(Amount::from_override(Some(1.0)), Amount::Overridden(1.0));
    }
}
