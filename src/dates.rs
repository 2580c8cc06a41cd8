//! Date normalization.
//!
//! Registries disagree on date layouts as much as on field names. The raw
//! value is always kept verbatim in the result; this module additionally
//! tries an ordered list of known layouts to produce a structured UTC
//! timestamp. Returning `None` is not an error, just absence.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Known layouts, most common first. Datetime layouts are tried before
/// date-only layouts with the same separators.
const FORMATS: [&str; 16] = [
    "%Y-%m-%dT%H:%M:%SZ",
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y.%m.%d %H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
    "%Y-%m-%d",
    "%Y.%m.%d",
    "%Y/%m/%d",
    "%d-%b-%Y",
    "%d-%B-%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%d.%m.%Y",
    "%d/%m/%Y",
    "%b %d %Y",
];

/// Parses a registry-supplied date string into a UTC timestamp.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let cleaned = raw
        .trim()
        .replace(" (UTC)", "")
        .replace(" UTC", "Z")
        .replace(" +0000", "Z");
    let cleaned = cleaned.trim();

    for fmt in &FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(cleaned, fmt) {
            return Some(dt.and_utc());
        }
        if let Ok(date) = NaiveDate::parse_from_str(cleaned, fmt) {
            return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    // ISO 8601 with an offset, e.g. 2020-01-15T00:00:00+02:00
    if let Ok(dt) = DateTime::parse_from_rfc3339(cleaned) {
        return Some(dt.with_timezone(&Utc));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_iso_datetime() {
        let dt = parse_date("2018-07-18T04:00:00Z").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day(), dt.hour()), (2018, 7, 18, 4));
    }

    #[test]
    fn test_date_only_layouts() {
        for raw in ["1996-09-13", "1996.09.13", "1996/09/13", "13-Sep-1996", "13 September 1996"] {
            let dt = parse_date(raw).unwrap_or_else(|| panic!("failed to parse {raw}"));
            assert_eq!((dt.year(), dt.month(), dt.day()), (1996, 9, 13), "{raw}");
        }
    }

    #[test]
    fn test_european_day_first() {
        let dt = parse_date("13.09.1996").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (1996, 9, 13));
    }

    #[test]
    fn test_utc_suffix() {
        let dt = parse_date("2020-01-15T00:00:00 UTC").unwrap();
        assert_eq!(dt.year(), 2020);
    }

    #[test]
    fn test_offset_datetime() {
        let dt = parse_date("2020-01-15T06:00:00+06:00").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day(), dt.hour()), (2020, 1, 15, 0));
    }

    #[test]
    fn test_garbage_is_none() {
        assert!(parse_date("").is_none());
        assert!(parse_date("before migration").is_none());
        assert!(parse_date("not a date 2020").is_none());
    }
}
