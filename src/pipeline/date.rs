//! Date normalization for loosely formatted email send dates.
//!
//! Email exports mix every date style their originating clients produced:
//! RFC 2822 headers, Outlook's `Monday, March 02, 2015 10:11 AM`, bare
//! `Jan 1 2020`, US slash dates. Sorting and diffing the correspondence log
//! only works if those all collapse to one canonical form, so
//! [`normalize_date`] funnels them through a ladder of chrono parsers into
//! RFC 3339 UTC.
//!
//! Failure is soft by design: an unparseable value is returned unchanged so
//! the record still carries whatever the source document said. Callers never
//! see an error from this module.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Formats carrying a time of day but no timezone. Assumed UTC.
const DATETIME_FORMATS: &[&str] = &[
    // Outlook "Sent:" style, with and without weekday and seconds
    "%A, %B %d, %Y %I:%M %p",
    "%A, %B %d, %Y %I:%M:%S %p",
    "%B %d, %Y %I:%M %p",
    "%B %d, %Y %I:%M:%S %p",
    "%b %d, %Y %I:%M %p",
    // US slash dates
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    // ISO-ish without offset
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Date-only formats. Midnight UTC is assumed.
const DATE_FORMATS: &[&str] = &[
    "%A, %B %d, %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%m/%d/%Y",
    "%Y-%m-%d",
];

/// Normalize a raw date string to RFC 3339 UTC (`+00:00` offset).
///
/// Timezone-less inputs are assumed to be UTC; zoned inputs are converted.
/// If no parser in the ladder accepts the input, the original string is
/// returned unchanged — the caller keeps the raw value rather than losing
/// the field.
pub fn normalize_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(dt) => dt.to_rfc3339(),
        None => raw.to_string(),
    }
}

/// Try every parser in the ladder, most specific first.
pub(crate) fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    // Self-describing zoned formats first: these carry an offset we must
    // honour rather than assume away.
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&ndt));
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(nd) = NaiveDate::parse_from_str(s, fmt) {
            let ndt = nd.and_hms_opt(0, 0, 0)?;
            return Some(Utc.from_utc_datetime(&ndt));
        }
    }

    None
}
