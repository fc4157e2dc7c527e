//! Lenient wire value helpers
//!
//! Order forms post numbers as strings, clear choices with `""`, and send
//! dates in whatever shape the browser produced. These helpers normalise
//! that at the serde boundary.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Blankable
// =============================================================================

/// A choice that may be explicitly left empty (`""` on the wire)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Blankable<T> {
    #[default]
    Blank,
    Value(T),
}

impl<T> Blankable<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Blankable::Blank => None,
            Blankable::Value(v) => Some(v),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Blankable::Blank)
    }
}

impl<T: PartialEq> Blankable<T> {
    pub fn is(&self, other: &T) -> bool {
        self.value() == Some(other)
    }
}

impl<T> From<T> for Blankable<T> {
    fn from(value: T) -> Self {
        Blankable::Value(value)
    }
}

impl<T: fmt::Display> fmt::Display for Blankable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Blankable::Blank => Ok(()),
            Blankable::Value(v) => v.fmt(f),
        }
    }
}

impl<T: FromStr> FromStr for Blankable<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            Ok(Blankable::Blank)
        } else {
            T::from_str(s).map(Blankable::Value)
        }
    }
}

impl<T: fmt::Display> Serialize for Blankable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T> Deserialize<'de> for Blankable<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(Blankable::Blank),
            Some(s) => s.parse().map_err(de::Error::custom),
        }
    }
}

// =============================================================================
// LooseDate
// =============================================================================

/// A date field that keeps unparseable input verbatim
///
/// Parseable input becomes a UTC timestamp; anything else is carried through
/// unchanged so that partial edits never fail on a date the client mangled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LooseDate {
    Date(DateTime<Utc>),
    Raw(String),
}

impl LooseDate {
    pub fn now() -> Self {
        LooseDate::Date(Utc::now())
    }

    /// Coerce text into a date when it looks like one
    pub fn parse(input: &str) -> Self {
        parse_datetime(input)
            .map(LooseDate::Date)
            .unwrap_or_else(|| LooseDate::Raw(input.to_string()))
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            LooseDate::Date(d) => Some(*d),
            LooseDate::Raw(_) => None,
        }
    }

    /// Calendar form used in exports and emails (`YYYY-MM-DD`)
    pub fn day(&self) -> String {
        match self {
            LooseDate::Date(d) => d.format("%Y-%m-%d").to_string(),
            LooseDate::Raw(s) => s.clone(),
        }
    }

    /// Whether the field carries no usable value
    pub fn is_empty(&self) -> bool {
        matches!(self, LooseDate::Raw(s) if s.trim().is_empty())
    }
}

impl From<DateTime<Utc>> for LooseDate {
    fn from(value: DateTime<Utc>) -> Self {
        LooseDate::Date(value)
    }
}

impl Serialize for LooseDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LooseDate::Date(d) => {
                serializer.serialize_str(&d.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            LooseDate::Raw(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for LooseDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LooseDateVisitor;

        impl de::Visitor<'_> for LooseDateVisitor {
            type Value = LooseDate;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a date string or a millisecond timestamp")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<LooseDate, E> {
                Ok(LooseDate::parse(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<LooseDate, E> {
                Ok(DateTime::from_timestamp_millis(v)
                    .map(LooseDate::Date)
                    .unwrap_or_else(|| LooseDate::Raw(v.to_string())))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<LooseDate, E> {
                match i64::try_from(v) {
                    Ok(v) => self.visit_i64(v),
                    Err(_) => Ok(LooseDate::Raw(v.to_string())),
                }
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<LooseDate, E> {
                self.visit_i64(v as i64)
            }
        }

        deserializer.deserialize_any(LooseDateVisitor)
    }
}

/// Parse the date shapes browsers and spreadsheets commonly produce
pub fn parse_datetime(input: &str) -> Option<DateTime<Utc>> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|n| n.and_utc());
        }
    }
    None
}

// =============================================================================
// Flexible numbers
// =============================================================================

/// `Option<f64>` that also accepts numeric strings; `""` and null are `None`
pub mod flexible_f64 {
    use serde::{Deserialize, Deserializer, Serializer, de};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_f64(*v),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        match Option::<NumberOrText>::deserialize(deserializer)? {
            None => Ok(None),
            Some(NumberOrText::Number(n)) => Ok(Some(n)),
            Some(NumberOrText::Text(s)) => {
                let s = s.trim();
                if s.is_empty() {
                    return Ok(None);
                }
                s.parse::<f64>()
                    .map(Some)
                    .map_err(|_| de::Error::custom(format!("'{s}' is not a number")))
            }
        }
    }

    /// Same wire shapes, but the value must be present
    pub fn required<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        deserialize(deserializer)?.ok_or_else(|| de::Error::custom("a number is required"))
    }
}

// =============================================================================
// Clearable fields
// =============================================================================

/// `Option<Option<T>>` for partial updates: a missing key stays `None`
/// (untouched), an explicit `null` becomes `Some(None)` (cleared)
pub mod nullable {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

/// `Option<String>` that also accepts numbers (phone numbers, pin codes, GST)
pub mod flexible_text {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Integer(i64),
        Number(f64),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(match Option::<TextOrNumber>::deserialize(deserializer)? {
            None => None,
            Some(TextOrNumber::Text(s)) => Some(s),
            Some(TextOrNumber::Integer(n)) => Some(n.to_string()),
            Some(TextOrNumber::Number(n)) => Some(n.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq)]
    enum Colour {
        Red,
    }

    impl FromStr for Colour {
        type Err = String;
        fn from_str(s: &str) -> Result<Self, String> {
            match s {
                "Red" => Ok(Colour::Red),
                other => Err(format!("unknown colour {other}")),
            }
        }
    }

    impl fmt::Display for Colour {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("Red")
        }
    }

    #[test]
    fn blankable_accepts_empty_and_null() {
        let v: Blankable<Colour> = serde_json::from_value(json!("")).unwrap();
        assert!(v.is_blank());
        let v: Blankable<Colour> = serde_json::from_value(json!(null)).unwrap();
        assert!(v.is_blank());
        let v: Blankable<Colour> = serde_json::from_value(json!("Red")).unwrap();
        assert!(v.is(&Colour::Red));
        assert!(serde_json::from_value::<Blankable<Colour>>(json!("Blue")).is_err());
        assert_eq!(serde_json::to_value(Blankable::<Colour>::Blank).unwrap(), json!(""));
    }

    #[test]
    fn loose_date_parses_common_shapes() {
        assert!(matches!(LooseDate::parse("2025-03-01"), LooseDate::Date(_)));
        assert!(matches!(LooseDate::parse("2025-03-01T10:30"), LooseDate::Date(_)));
        assert!(matches!(
            LooseDate::parse("2025-03-01T10:30:00.000Z"),
            LooseDate::Date(_)
        ));
        assert_eq!(LooseDate::parse("2025-03-01").day(), "2025-03-01");
    }

    #[test]
    fn loose_date_keeps_garbage_verbatim() {
        let d: LooseDate = serde_json::from_value(json!("next tuesday")).unwrap();
        assert_eq!(d, LooseDate::Raw("next tuesday".into()));
        assert_eq!(serde_json::to_value(&d).unwrap(), json!("next tuesday"));
    }

    #[test]
    fn loose_date_survives_storage_round_trip() {
        let original = LooseDate::parse("2025-03-01T10:30:00Z");
        let stored = serde_json::to_value(&original).unwrap();
        let back: LooseDate = serde_json::from_value(stored).unwrap();
        assert_eq!(original, back);
    }

    #[derive(Deserialize)]
    struct Amounts {
        #[serde(default, with = "flexible_f64")]
        qty: Option<f64>,
        #[serde(default, deserialize_with = "flexible_text::deserialize")]
        phone: Option<String>,
    }

    #[test]
    fn flexible_values() {
        let a: Amounts = serde_json::from_value(json!({"qty": "2", "phone": 9876543210u64})).unwrap();
        assert_eq!(a.qty, Some(2.0));
        assert_eq!(a.phone.as_deref(), Some("9876543210"));

        let a: Amounts = serde_json::from_value(json!({"qty": ""})).unwrap();
        assert_eq!(a.qty, None);
        assert!(serde_json::from_value::<Amounts>(json!({"qty": "two"})).is_err());
    }

    #[derive(Deserialize)]
    struct Line {
        #[serde(deserialize_with = "flexible_f64::required")]
        qty: f64,
    }

    #[test]
    fn required_numbers_accept_text_but_not_blanks() {
        let l: Line = serde_json::from_value(json!({"qty": " 3 "})).unwrap();
        assert_eq!(l.qty, 3.0);
        let l: Line = serde_json::from_value(json!({"qty": 4.5})).unwrap();
        assert_eq!(l.qty, 4.5);
        assert!(serde_json::from_value::<Line>(json!({"qty": ""})).is_err());
        assert!(serde_json::from_value::<Line>(json!({"qty": null})).is_err());
        assert!(serde_json::from_value::<Line>(json!({})).is_err());
    }
}
