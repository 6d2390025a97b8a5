//! Filter specification supplied by UI-state collaborators.
//!
//! A [`FilterSpec`] is a sparse record of independent criteria. Any field may
//! be omitted, blank, an empty set or `false`; all of those mean "no
//! constraint". Criteria combine with AND across fields and OR within a
//! field's set of acceptable values.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::RawId;
use crate::config::Vocabulary;
use crate::error::{EngineError, EngineResult};
use crate::query::dates::parse_date;
use crate::query::text::normalize;

/// A criterion value that is either a single string or a set of strings.
///
/// Integer values (ids sent as JSON numbers) are read as their decimal text.
///
/// # Example
///
/// ```
/// use personnel_engine::models::OneOrMany;
///
/// let one: OneOrMany = serde_json::from_str(r#""Male""#).unwrap();
/// let many: OneOrMany = serde_json::from_str(r#"["Male", " ", "Female"]"#).unwrap();
/// assert_eq!(one.values().collect::<Vec<_>>(), vec!["Male"]);
/// assert_eq!(many.values().collect::<Vec<_>>(), vec!["Male", "Female"]);
///
/// let ids: OneOrMany = serde_json::from_str("[3, \"4\"]").unwrap();
/// assert_eq!(ids.values().collect::<Vec<_>>(), vec!["3", "4"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OneOrMany {
    /// A single acceptable value.
    One(String),
    /// A set of acceptable values.
    Many(Vec<String>),
}

impl OneOrMany {
    /// Iterates over the non-blank values, trimmed.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            OneOrMany::One(value) => std::slice::from_ref(value),
            OneOrMany::Many(values) => values,
        };
        slice.iter().map(|v| v.trim()).filter(|v| !v.is_empty())
    }

    /// Returns true if there is no non-blank value.
    pub fn is_blank(&self) -> bool {
        self.values().next().is_none()
    }
}

impl<'de> Deserialize<'de> for OneOrMany {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            One(RawId),
            Many(Vec<RawId>),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::One(value) => OneOrMany::One(value.into()),
            Raw::Many(values) => OneOrMany::Many(values.into_iter().map(String::from).collect()),
        })
    }
}

impl From<&str> for OneOrMany {
    fn from(value: &str) -> Self {
        OneOrMany::One(value.to_string())
    }
}

impl From<Vec<&str>> for OneOrMany {
    fn from(values: Vec<&str>) -> Self {
        OneOrMany::Many(values.into_iter().map(str::to_string).collect())
    }
}

/// The sparse filter record. Wire names are camelCase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    /// Free text matched against name, father's name and identity number.
    pub query: Option<String>,
    /// Employee-level or current-block status.
    pub status: Option<OneOrMany>,
    /// Posting category id of the current block.
    pub category_id: Option<OneOrMany>,
    /// Designation id of the current block.
    pub designation_id: Option<OneOrMany>,
    /// Unit id of the current block.
    pub unit_id: Option<OneOrMany>,
    /// Posting place title of the current block (substring match).
    pub posting_place: Option<OneOrMany>,
    /// Headquarters id of the current block.
    pub hq_id: Option<OneOrMany>,
    /// Tehsil id of the current block.
    pub tehsil_id: Option<OneOrMany>,
    /// Gender.
    pub gender: Option<OneOrMany>,
    /// Domicile.
    pub domicile: Option<OneOrMany>,
    /// Sect.
    pub sect: Option<OneOrMany>,
    /// Pay grade of the current block, e.g. "17" or "BPS-17".
    pub bps_grade: Option<OneOrMany>,

    /// Date of birth, lower bound.
    pub dob_from: Option<String>,
    /// Date of birth, upper bound.
    pub dob_to: Option<String>,
    /// Date of appointment, lower bound.
    pub doa_from: Option<String>,
    /// Date of appointment, upper bound.
    pub doa_to: Option<String>,
    /// Status change date, lower bound.
    pub status_date_from: Option<String>,
    /// Status change date, upper bound.
    pub status_date_to: Option<String>,

    /// Only employees with a leave in progress today. `null` reads as `false`.
    #[serde(deserialize_with = "null_as_false")]
    pub active_leave_only: bool,

    /// Only employees whose current posting started on or after this date.
    pub since_date: Option<String>,

    /// Leave type.
    pub leave_type: Option<OneOrMany>,
    /// Leave window, lower bound.
    pub leave_from_date: Option<String>,
    /// Leave window, upper bound.
    pub leave_to_date: Option<String>,

    /// Disciplinary action date, lower bound.
    pub disciplinary_from_date: Option<String>,
    /// Disciplinary action date, upper bound.
    pub disciplinary_to_date: Option<String>,
}

/// One independently switchable filter criterion.
///
/// Also used to report which test excluded an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    /// Free-text name / identity number search.
    Query,
    /// Gender.
    Gender,
    /// Domicile.
    Domicile,
    /// Sect.
    Sect,
    /// Date-of-birth range.
    DateOfBirth,
    /// Date-of-appointment range.
    DateOfAppointment,
    /// A block-scoped criterion is active but no current block resolves.
    CurrentBlock,
    /// Status.
    Status,
    /// Status-change date range.
    StatusDate,
    /// Headquarters id.
    HeadquartersId,
    /// Tehsil id.
    TehsilId,
    /// Designation id.
    DesignationId,
    /// Unit id.
    UnitId,
    /// Posting category id.
    PostingCategoryId,
    /// Posting place title.
    PostingPlace,
    /// Pay grade.
    BpsGrade,
    /// Current posting start cutoff.
    SinceDate,
    /// Leave in progress now.
    ActiveLeave,
    /// Leave type and leave window.
    Leave,
    /// Disciplinary action date range.
    Disciplinary,
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Criterion::Query => "query",
            Criterion::Gender => "gender",
            Criterion::Domicile => "domicile",
            Criterion::Sect => "sect",
            Criterion::DateOfBirth => "date_of_birth",
            Criterion::DateOfAppointment => "date_of_appointment",
            Criterion::CurrentBlock => "current_block",
            Criterion::Status => "status",
            Criterion::StatusDate => "status_date",
            Criterion::HeadquartersId => "headquarters_id",
            Criterion::TehsilId => "tehsil_id",
            Criterion::DesignationId => "designation_id",
            Criterion::UnitId => "unit_id",
            Criterion::PostingCategoryId => "posting_category_id",
            Criterion::PostingPlace => "posting_place",
            Criterion::BpsGrade => "bps_grade",
            Criterion::SinceDate => "since_date",
            Criterion::ActiveLeave => "active_leave",
            Criterion::Leave => "leave",
            Criterion::Disciplinary => "disciplinary",
        };
        f.write_str(name)
    }
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

pub(crate) fn is_set(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

pub(crate) fn has_values(value: Option<&OneOrMany>) -> bool {
    value.is_some_and(|v| !v.is_blank())
}

impl FilterSpec {
    /// Returns the criteria this specification activates, in evaluation order.
    ///
    /// [`Criterion::CurrentBlock`] is never listed; it is implied by any of the
    /// block-scoped criteria.
    ///
    /// # Example
    ///
    /// ```
    /// use personnel_engine::models::{Criterion, FilterSpec};
    ///
    /// let spec = FilterSpec {
    ///     gender: Some("Female".into()),
    ///     leave_from_date: Some("2024-01-01".to_string()),
    ///     ..Default::default()
    /// };
    /// assert_eq!(spec.active_criteria(), vec![Criterion::Gender, Criterion::Leave]);
    /// ```
    pub fn active_criteria(&self) -> Vec<Criterion> {
        let since_active = self
            .since_date
            .as_deref()
            .and_then(parse_date)
            .is_some();

        let checks = [
            (Criterion::Query, !normalize(self.query.as_deref()).is_empty()),
            (Criterion::Gender, has_values(self.gender.as_ref())),
            (Criterion::Domicile, has_values(self.domicile.as_ref())),
            (Criterion::Sect, has_values(self.sect.as_ref())),
            (
                Criterion::DateOfBirth,
                is_set(self.dob_from.as_deref()) || is_set(self.dob_to.as_deref()),
            ),
            (
                Criterion::DateOfAppointment,
                is_set(self.doa_from.as_deref()) || is_set(self.doa_to.as_deref()),
            ),
            (Criterion::Status, has_values(self.status.as_ref())),
            (
                Criterion::StatusDate,
                is_set(self.status_date_from.as_deref()) || is_set(self.status_date_to.as_deref()),
            ),
            (Criterion::HeadquartersId, has_values(self.hq_id.as_ref())),
            (Criterion::TehsilId, has_values(self.tehsil_id.as_ref())),
            (Criterion::DesignationId, has_values(self.designation_id.as_ref())),
            (Criterion::UnitId, has_values(self.unit_id.as_ref())),
            (Criterion::PostingCategoryId, has_values(self.category_id.as_ref())),
            (Criterion::PostingPlace, has_values(self.posting_place.as_ref())),
            (Criterion::BpsGrade, has_values(self.bps_grade.as_ref())),
            (Criterion::SinceDate, since_active),
            (Criterion::ActiveLeave, self.active_leave_only),
            (
                Criterion::Leave,
                has_values(self.leave_type.as_ref())
                    || is_set(self.leave_from_date.as_deref())
                    || is_set(self.leave_to_date.as_deref()),
            ),
            (
                Criterion::Disciplinary,
                is_set(self.disciplinary_from_date.as_deref())
                    || is_set(self.disciplinary_to_date.as_deref()),
            ),
        ];

        checks
            .into_iter()
            .filter_map(|(criterion, active)| active.then_some(criterion))
            .collect()
    }

    /// Returns true if no criterion is active.
    pub fn is_empty(&self) -> bool {
        self.active_criteria().is_empty()
    }

    /// Checks requested statuses, leave types and date bounds against `vocabulary`.
    ///
    /// The filter itself never calls this; unknown values simply match nothing
    /// and unparseable bounds are ignored. UI collaborators can use it to flag
    /// a specification before running it.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: [`EngineError::UnknownStatus`],
    /// [`EngineError::UnknownLeaveType`] or [`EngineError::InvalidFilterDate`].
    pub fn validate(&self, vocabulary: &Vocabulary) -> EngineResult<()> {
        if let Some(statuses) = &self.status {
            if let Some(unknown) = statuses
                .values()
                .find(|s| vocabulary.canonical_status(s).is_none())
            {
                return Err(EngineError::UnknownStatus {
                    status: unknown.to_string(),
                });
            }
        }

        if let Some(leave_types) = &self.leave_type {
            if let Some(unknown) = leave_types
                .values()
                .find(|t| vocabulary.canonical_leave_type(t).is_none())
            {
                return Err(EngineError::UnknownLeaveType {
                    leave_type: unknown.to_string(),
                });
            }
        }

        let dates = [
            ("dobFrom", &self.dob_from),
            ("dobTo", &self.dob_to),
            ("doaFrom", &self.doa_from),
            ("doaTo", &self.doa_to),
            ("statusDateFrom", &self.status_date_from),
            ("statusDateTo", &self.status_date_to),
            ("sinceDate", &self.since_date),
            ("leaveFromDate", &self.leave_from_date),
            ("leaveToDate", &self.leave_to_date),
            ("disciplinaryFromDate", &self.disciplinary_from_date),
            ("disciplinaryToDate", &self.disciplinary_to_date),
        ];
        for (field, value) in dates {
            let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) else {
                continue;
            };
            if parse_date(value).is_none() {
                return Err(EngineError::InvalidFilterDate {
                    field: field.to_string(),
                    value: value.to_string(),
                });
            }
        }

        Ok(())
    }
}
