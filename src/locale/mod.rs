//! Locale normalization for Bangla-script listing text
//!
//! Pure functions that translate native-script digits, month abbreviations,
//! and AM/PM markers into their ASCII forms, and resolve a "posted at"
//! phrase into an absolute time and date. The translation tables come from
//! [`LocaleConfig`](crate::config::LocaleConfig).

mod timestamp;

pub use timestamp::resolve_timestamp;

use crate::config::LocaleConfig;

/// Maps each native-script digit to its ASCII equivalent
///
/// Non-digit characters pass through unchanged. Total function.
pub fn normalize_digits(text: &str, locale: &LocaleConfig) -> String {
    text.chars()
        .map(|c| match locale.digits.chars().position(|d| d == c) {
            Some(i) => (b'0' + i as u8) as char,
            None => c,
        })
        .collect()
}

/// Replaces native month abbreviations and AM/PM markers with ASCII forms
///
/// The tables contain no overlapping substrings, so replacement order
/// within a table does not matter.
pub fn normalize_month(text: &str, locale: &LocaleConfig) -> String {
    let mut out = text.to_string();
    for month in &locale.months {
        out = out.replace(&month.native, &month.ascii);
    }
    for meridiem in &locale.meridiems {
        out = out.replace(&meridiem.native, &meridiem.ascii);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locale() -> LocaleConfig {
        LocaleConfig::default()
    }

    #[test]
    fn test_normalize_digits_full_table() {
        assert_eq!(normalize_digits("০১২৩৪৫৬৭৮৯", &locale()), "0123456789");
    }

    #[test]
    fn test_normalize_digits_passes_other_chars() {
        assert_eq!(normalize_digits("৳ ১,২০০ টাকা", &locale()), "৳ 1,200 টাকা");
    }

    #[test]
    fn test_normalize_digits_preserves_length() {
        // Each native digit maps to exactly one ASCII digit
        for input in ["১৫ মার্চ", "abc", "", "৯৯৯", "mixed ৩ text"] {
            let output = normalize_digits(input, &locale());
            assert_eq!(input.chars().count(), output.chars().count());
        }
    }

    #[test]
    fn test_normalize_digits_ascii_untouched() {
        assert_eq!(normalize_digits("already 123", &locale()), "already 123");
    }

    #[test]
    fn test_normalize_month() {
        assert_eq!(normalize_month("১৫ মার্চ", &locale()), "১৫ Mar");
        assert_eq!(normalize_month("৩ ডিসে", &locale()), "৩ Dec");
    }

    #[test]
    fn test_normalize_meridiem() {
        assert_eq!(normalize_month("২:৩০ পিএম", &locale()), "২:৩০ PM");
        assert_eq!(normalize_month("৯:০০ এএম", &locale()), "৯:০০ AM");
    }

    #[test]
    fn test_normalize_month_no_match() {
        assert_eq!(normalize_month("no bangla here", &locale()), "no bangla here");
    }
}
