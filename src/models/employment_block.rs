//! Employment block, leave and disciplinary action models.
//!
//! An [`EmploymentBlock`] is one contiguous tenure. It owns the leaves and
//! disciplinary actions recorded against it. Dates are kept as the raw strings
//! the data source supplied; parsing happens at comparison time so that a
//! malformed date only fails the test that reads it.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::lenient_id;
use crate::query::dates::{RecordDate, record_date};

/// One contiguous tenure: a posting with its location, role and status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmploymentBlock {
    /// Record identifier assigned by the data source.
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    /// Headquarters (district) id.
    #[serde(default, deserialize_with = "lenient_id")]
    pub hq_id: Option<String>,
    /// Tehsil (sub-district) id.
    #[serde(default, deserialize_with = "lenient_id")]
    pub tehsil_id: Option<String>,
    /// Designation id.
    #[serde(default, deserialize_with = "lenient_id")]
    pub designation_id: Option<String>,
    /// Unit id.
    #[serde(default, deserialize_with = "lenient_id")]
    pub unit_id: Option<String>,
    /// Posting category id.
    #[serde(default, deserialize_with = "lenient_id")]
    pub posting_category_id: Option<String>,
    /// Display title of the posting place.
    #[serde(default)]
    pub posting_place_title: Option<String>,
    /// Pay scale grade, e.g. "BPS-17" or "17".
    #[serde(default)]
    pub bps: Option<String>,
    /// Start of the tenure.
    #[serde(default)]
    pub from_date: Option<String>,
    /// End of the tenure; absent or empty means ongoing.
    #[serde(default)]
    pub to_date: Option<String>,
    /// Point-in-time employment status.
    #[serde(default)]
    pub status: Option<String>,
    /// When `status` took effect.
    #[serde(default)]
    pub status_date: Option<String>,
    /// Explicit "this is the current posting" flag.
    #[serde(default)]
    pub is_currently_working: bool,
    /// Leaves taken during this tenure.
    #[serde(default)]
    pub leaves: Vec<Leave>,
    /// Disciplinary actions recorded during this tenure.
    #[serde(default)]
    pub disciplinary_actions: Vec<DisciplinaryAction>,
}

/// A leave entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leave {
    /// Record identifier assigned by the data source.
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    /// Leave type, e.g. "Medical Leave".
    #[serde(rename = "type", default)]
    pub leave_type: Option<String>,
    /// First day of leave.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Last day of leave; absent or empty means the leave is still open.
    #[serde(default)]
    pub end_date: Option<String>,
}

impl Leave {
    /// Returns true if this leave has started by `now` and has not yet ended.
    ///
    /// An absent end date means the leave is open-ended. A start date that does
    /// not parse, or an end date that is present but does not parse, makes the
    /// leave inactive.
    pub fn is_active_at(&self, now: NaiveDateTime) -> bool {
        let RecordDate::Parsed(start) = record_date(self.start_date.as_deref()) else {
            return false;
        };
        match record_date(self.end_date.as_deref()) {
            RecordDate::Absent => start <= now,
            RecordDate::Parsed(end) => start <= now && now <= end,
            RecordDate::Malformed => false,
        }
    }
}

/// A disciplinary action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisciplinaryAction {
    /// Record identifier assigned by the data source.
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    /// When the action was taken.
    #[serde(default)]
    pub action_date: Option<String>,
    /// Decision or outcome text.
    #[serde(default)]
    pub decision: Option<String>,
    /// Free-form court or authority reference.
    #[serde(default)]
    pub authority_reference: Option<String>,
}
