//! Utility functions for date parsing and date (de)serialization.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// Parse a calendar date leniently, dropping any time component.
///
/// Accepts:
/// - YYYY-MM-DD
/// - RFC3339 datetime (date in its own offset)
/// - Naive datetime YYYY-MM-DDTHH:MM:SS, with or without fractional seconds
pub fn parse_date_lenient(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(ndt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(ndt.date());
    }
    None
}

/// Serde adapter for `NaiveDate` fields that were stored either as plain dates
/// or as full ISO timestamps.
pub(crate) fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let raw = String::deserialize(deserializer)?;
    parse_date_lenient(&raw)
        .ok_or_else(|| D::Error::custom(format!("expected a date, got {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_date_accepts_date_only() {
        assert_eq!(parse_date_lenient("2025-12-15"), Some(ymd(2025, 12, 15)));
    }

    #[test]
    fn parse_date_drops_time_from_rfc3339() {
        assert_eq!(
            parse_date_lenient("2025-12-15T10:30:00.000Z"),
            Some(ymd(2025, 12, 15))
        );
    }

    #[test]
    fn parse_date_drops_time_from_naive_datetime() {
        assert_eq!(
            parse_date_lenient("2025-12-15T23:59:59"),
            Some(ymd(2025, 12, 15))
        );
    }

    #[test]
    fn parse_date_rejects_invalid() {
        assert!(parse_date_lenient("not-a-date").is_none());
        assert!(parse_date_lenient("2025-02-30").is_none());
    }
}
