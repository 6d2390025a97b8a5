//! Date parsing and closed-interval tests.
//!
//! Record dates arrive as strings of varying shape. Everything is read into a
//! UTC [`NaiveDateTime`]; a date without a time is midnight. A date that does
//! not parse never satisfies a comparison.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parses a date or timestamp.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (converted to UTC) and
/// `YYYY-MM-DDTHH:MM[:SS[.fff]]` read as UTC. Returns `None` for anything else.
///
/// # Example
///
/// ```
/// use personnel_engine::query::parse_date;
///
/// assert!(parse_date("2024-01-15").is_some());
/// assert!(parse_date("2024-01-15T10:30:00.000Z").is_some());
/// assert!(parse_date("0000-00-00").is_none());
/// assert!(parse_date("next week").is_none());
/// ```
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.naive_utc());
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

/// A record-side date, distinguishing "not given" from "given but unreadable".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RecordDate {
    Absent,
    Malformed,
    Parsed(NaiveDateTime),
}

pub(crate) fn record_date(raw: Option<&str>) -> RecordDate {
    match raw.map(str::trim).filter(|r| !r.is_empty()) {
        None => RecordDate::Absent,
        Some(raw) => parse_date(raw).map_or(RecordDate::Malformed, RecordDate::Parsed),
    }
}

/// Parses an optional value; absent, blank and malformed all give `None`.
pub(crate) fn parse_optional(raw: Option<&str>) -> Option<NaiveDateTime> {
    raw.and_then(parse_date)
}

/// Inclusive bounds; a missing bound is unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct DateBounds {
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
}

impl DateBounds {
    pub fn parse(from: Option<&str>, to: Option<&str>) -> Self {
        Self {
            from: parse_optional(from),
            to: parse_optional(to),
        }
    }

    pub fn contains(&self, date: NaiveDateTime) -> bool {
        self.from.is_none_or(|from| from <= date) && self.to.is_none_or(|to| date <= to)
    }

    /// True if `raw` parses and lies inside the bounds.
    pub fn contains_raw(&self, raw: Option<&str>) -> bool {
        parse_optional(raw).is_some_and(|date| self.contains(date))
    }
}
