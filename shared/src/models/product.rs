//! Product line items embedded in an order

use crate::util::{flexible_f64, flexible_text};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;
use std::str::FromStr;

/// Tax rate of a product line
///
/// `Including` means the unit price already contains GST, so nothing is
/// added on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GstRate {
    Eighteen,
    TwentyEight,
    Including,
}

impl GstRate {
    /// Percentage added on top of the unit price
    pub fn percent(&self) -> u32 {
        match self {
            GstRate::Eighteen => 18,
            GstRate::TwentyEight => 28,
            GstRate::Including => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GstRate::Eighteen => "18",
            GstRate::TwentyEight => "28",
            GstRate::Including => "including",
        }
    }
}

impl fmt::Display for GstRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GstRate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("including") {
            return Ok(GstRate::Including);
        }
        match s.trim_end_matches('%').parse::<f64>() {
            Ok(v) if v == 18.0 => Ok(GstRate::Eighteen),
            Ok(v) if v == 28.0 => Ok(GstRate::TwentyEight),
            _ => Err(format!("Invalid GST value: '{s}'")),
        }
    }
}

impl Serialize for GstRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for GstRate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match flexible_text::deserialize(deserializer)? {
            Some(s) => s.parse().map_err(de::Error::custom),
            None => Err(de::Error::custom("GST value is required")),
        }
    }
}

/// A validated product line as stored on an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductLine {
    pub product_type: String,
    #[serde(default = "not_applicable")]
    pub size: String,
    #[serde(default = "not_applicable")]
    pub spec: String,
    #[serde(deserialize_with = "flexible_f64::required")]
    pub qty: f64,
    #[serde(deserialize_with = "flexible_f64::required")]
    pub unit_price: f64,
    pub gst: GstRate,
    #[serde(default)]
    pub model_nos: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default)]
    pub warranty: String,
}

fn not_applicable() -> String {
    "N/A".to_string()
}

/// Product line as submitted by a client, before validation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductLineInput {
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub spec: Option<String>,
    #[serde(default, with = "flexible_f64")]
    pub qty: Option<f64>,
    #[serde(default, with = "flexible_f64")]
    pub unit_price: Option<f64>,
    #[serde(default, deserialize_with = "flexible_text::deserialize")]
    pub gst: Option<String>,
    #[serde(default)]
    pub model_nos: Option<Vec<String>>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub warranty: Option<String>,
}

/// Why a product line was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProductLineError {
    #[error("Product {0} is missing required fields")]
    MissingFields(usize),
    #[error("Product {0} must have a quantity greater than 0")]
    InvalidQuantity(usize),
    #[error("Product {0} must have a non-negative unit price")]
    InvalidPrice(usize),
    #[error("Product {index}: {reason}")]
    InvalidGst { index: usize, reason: String },
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl ProductLineInput {
    /// Validate and apply defaults; `index` is 1-based for messages
    pub fn into_line(self, index: usize) -> Result<ProductLine, ProductLineError> {
        let product_type = present(&self.product_type);
        let warranty = present(&self.warranty);
        let (Some(product_type), Some(qty), Some(unit_price), Some(gst), Some(warranty)) = (
            product_type,
            self.qty,
            self.unit_price,
            present(&self.gst),
            warranty,
        ) else {
            return Err(ProductLineError::MissingFields(index));
        };

        if !qty.is_finite() || qty <= 0.0 {
            return Err(ProductLineError::InvalidQuantity(index));
        }
        if !unit_price.is_finite() || unit_price < 0.0 {
            return Err(ProductLineError::InvalidPrice(index));
        }
        let gst = gst
            .parse::<GstRate>()
            .map_err(|reason| ProductLineError::InvalidGst { index, reason })?;

        Ok(ProductLine {
            product_type,
            size: present(&self.size).unwrap_or_else(not_applicable),
            spec: present(&self.spec).unwrap_or_else(not_applicable),
            qty,
            unit_price,
            gst,
            model_nos: self
                .model_nos
                .unwrap_or_default()
                .into_iter()
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty())
                .collect(),
            brand: present(&self.brand),
            warranty,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input() -> ProductLineInput {
        serde_json::from_value(json!({
            "productType": "IFPD",
            "qty": "2",
            "unitPrice": 100,
            "gst": 18,
            "warranty": "1 Year"
        }))
        .unwrap()
    }

    #[test]
    fn applies_defaults() {
        let line = input().into_line(1).unwrap();
        assert_eq!(line.size, "N/A");
        assert_eq!(line.spec, "N/A");
        assert!(line.model_nos.is_empty());
        assert_eq!(line.gst, GstRate::Eighteen);
        assert_eq!(line.qty, 2.0);
    }

    #[test]
    fn rejects_bad_lines() {
        let mut p = input();
        p.qty = Some(0.0);
        assert_eq!(p.into_line(2), Err(ProductLineError::InvalidQuantity(2)));

        let mut p = input();
        p.unit_price = Some(-1.0);
        assert_eq!(p.into_line(1), Err(ProductLineError::InvalidPrice(1)));

        let mut p = input();
        p.gst = Some("12".into());
        assert!(matches!(p.into_line(1), Err(ProductLineError::InvalidGst { .. })));

        let mut p = input();
        p.warranty = Some("  ".into());
        assert_eq!(p.into_line(3), Err(ProductLineError::MissingFields(3)));
    }

    #[test]
    fn gst_parsing() {
        assert_eq!("including".parse::<GstRate>(), Ok(GstRate::Including));
        assert_eq!("28%".parse::<GstRate>(), Ok(GstRate::TwentyEight));
        assert_eq!("18.0".parse::<GstRate>(), Ok(GstRate::Eighteen));
        assert_eq!(GstRate::Including.percent(), 0);
        assert_eq!(serde_json::to_value(GstRate::Eighteen).unwrap(), json!("18"));
    }
}
