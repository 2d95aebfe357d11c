//! Relative-to-absolute timestamp resolution

use crate::config::LocaleConfig;
use crate::locale::{normalize_digits, normalize_month};
use chrono::{Datelike, NaiveDateTime};

/// Resolves a posted-at phrase to an absolute `("HH:MM", "YYYY-MM-DD")` pair
///
/// The phrase has the shape `<day> <month> <hour>:<minute> <meridiem>` in
/// native script and carries no year; the year is taken from
/// `reference_now`. A phrase that does not match the expected pattern or
/// does not parse as a valid date yields `None` — an expected outcome for
/// non-listing pages, not an error.
pub fn resolve_timestamp(
    raw_phrase: &str,
    reference_now: NaiveDateTime,
    locale: &LocaleConfig,
) -> Option<(String, String)> {
    let normalized = normalize_month(&normalize_digits(raw_phrase, locale), locale);
    let with_year = format!("{} {}", normalized.trim(), reference_now.year());

    let parsed = NaiveDateTime::parse_from_str(&with_year, "%d %b %I:%M %p %Y").ok()?;

    Some((
        parsed.format("%H:%M").to_string(),
        parsed.format("%Y-%m-%d").to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn locale() -> LocaleConfig {
        LocaleConfig::default()
    }

    fn reference_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_resolve_afternoon_timestamp() {
        let resolved = resolve_timestamp("১৫ মার্চ ২:৩০ পিএম", reference_now(), &locale());
        assert_eq!(
            resolved,
            Some(("14:30".to_string(), "2025-03-15".to_string()))
        );
    }

    #[test]
    fn test_resolve_morning_timestamp() {
        let resolved = resolve_timestamp("৩ জানু ৯:০৫ এএম", reference_now(), &locale());
        assert_eq!(
            resolved,
            Some(("09:05".to_string(), "2025-01-03".to_string()))
        );
    }

    #[test]
    fn test_resolve_uses_reference_year() {
        let now = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let resolved = resolve_timestamp("১৫ মার্চ ২:৩০ পিএম", now, &locale());
        assert_eq!(resolved.unwrap().1, "2024-03-15");
    }

    #[test]
    fn test_resolve_rejects_garbage() {
        assert_eq!(resolve_timestamp("not a timestamp", reference_now(), &locale()), None);
        assert_eq!(resolve_timestamp("", reference_now(), &locale()), None);
    }

    #[test]
    fn test_resolve_rejects_invalid_calendar_date() {
        // 32nd of March does not exist
        let resolved = resolve_timestamp("৩২ মার্চ ২:৩০ পিএম", reference_now(), &locale());
        assert_eq!(resolved, None);
    }

    #[test]
    fn test_resolve_is_stable_on_non_matching_input() {
        // Re-running on a non-matching phrase always yields None, never panics
        for _ in 0..3 {
            assert_eq!(
                resolve_timestamp("পুরানো ঢাকা", reference_now(), &locale()),
                None
            );
        }
    }
}
