//! Input validation helpers
//!
//! Shape checks for customer contact fields. Regexes are compiled once.

use regex::Regex;
use std::sync::LazyLock;

static PHONE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("static regex"));
static PIN_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{6}$").expect("static regex"));
static EMAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex"));

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Exactly ten ASCII digits
pub fn is_phone(value: &str) -> bool {
    PHONE.is_match(value.trim())
}

/// Exactly six ASCII digits
pub fn is_pin_code(value: &str) -> bool {
    PIN_CODE.is_match(value.trim())
}

/// `local@domain.tld` shape, no whitespace
pub fn is_email(value: &str) -> bool {
    EMAIL.is_match(value.trim())
}

/// Trimmed, non-empty text
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_numbers() {
        assert!(is_phone("9876543210"));
        assert!(is_phone(" 9876543210 "));
        assert!(!is_phone("987654321"));
        assert!(!is_phone("98765432101"));
        assert!(!is_phone("98765-43210"));
        // Arabic-Indic digits
        assert!(!is_phone("٩٨٧٦٥٤٣٢١٠"));
    }

    #[test]
    fn pin_codes() {
        assert!(is_pin_code("110001"));
        assert!(!is_pin_code("11001"));
        assert!(!is_pin_code("11000a"));
        // Devanagari digits
        assert!(!is_pin_code("११०००१"));
    }

    #[test]
    fn emails() {
        assert!(is_email("buyer@school.edu.in"));
        assert!(!is_email("buyer@school"));
        assert!(!is_email("buyer school@x.com"));
        assert!(!is_email("@x.com"));
    }

    #[test]
    fn blank_text() {
        assert_eq!(non_blank(&Some("  ".into())), None);
        assert_eq!(non_blank(&Some(" Patna ".into())), Some("Patna"));
        assert_eq!(non_blank(&None), None);
    }
}
