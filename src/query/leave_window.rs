//! Leave window overlap.
//!
//! Decides whether a leave counts for a leave filter with optional lower and
//! upper bounds. An open-ended leave (no end date) extends forever, except in
//! the lower-bound-only case, where an open leave counts only if it started on
//! or after the bound.

use chrono::NaiveDateTime;

use crate::models::Leave;

use super::dates::{RecordDate, parse_optional, record_date};

/// The date part of a leave filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct LeaveWindow {
    from: Option<NaiveDateTime>,
    to: Option<NaiveDateTime>,
}

impl LeaveWindow {
    /// Bounds that do not parse are treated as absent.
    pub fn parse(from: Option<&str>, to: Option<&str>) -> Self {
        Self {
            from: parse_optional(from),
            to: parse_optional(to),
        }
    }

    /// Returns true if `leave` overlaps this window.
    ///
    /// A leave whose start date does not parse never counts. An end date that
    /// is present but does not parse fails any test that reads it.
    pub fn admits(&self, leave: &Leave) -> bool {
        let RecordDate::Parsed(start) = record_date(leave.start_date.as_deref()) else {
            return false;
        };
        let end = record_date(leave.end_date.as_deref());

        match (self.from, self.to) {
            (None, None) => true,
            (Some(from), None) => match end {
                RecordDate::Absent => start >= from,
                RecordDate::Parsed(end) => end >= from,
                RecordDate::Malformed => false,
            },
            (None, Some(to)) => start <= to,
            (Some(from), Some(to)) => {
                start <= to
                    && match end {
                        RecordDate::Absent => true,
                        RecordDate::Parsed(end) => end >= from,
                        RecordDate::Malformed => false,
                    }
            }
        }
    }
}
