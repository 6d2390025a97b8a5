//! Employee master record.
//!
//! This module defines the [`Employee`] struct as supplied by the data-loading
//! collaborator. Every attribute other than the employment history is optional
//! because records arrive loosely shaped; the engine excludes what it cannot
//! read instead of rejecting the record.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::employment_block::{DisciplinaryAction, EmploymentBlock, Leave};
use super::lenient_id;
use crate::query::resolve_current_block;

/// One person's master record together with their employment history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Record identifier assigned by the data source.
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    /// Full name.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Father's name.
    #[serde(default)]
    pub father_name: Option<String>,
    /// National identity number, possibly with separators (e.g. "36302-1234567-1").
    #[serde(default)]
    pub cnic: Option<String>,
    /// Date of birth.
    #[serde(default)]
    pub dob: Option<String>,
    /// Gender.
    #[serde(default)]
    pub gender: Option<String>,
    /// District of domicile.
    #[serde(default)]
    pub domicile: Option<String>,
    /// Religious or sect category.
    #[serde(default)]
    pub sect: Option<String>,
    /// Date of first appointment.
    #[serde(default)]
    pub date_of_appointment: Option<String>,
    /// Top-level life-cycle status (e.g. "Active", "Suspended").
    #[serde(default)]
    pub status: Option<String>,
    /// When the record was created.
    #[serde(default)]
    pub created_at: Option<String>,
    /// When the record was last updated.
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Employment blocks in caller-supplied order, not necessarily chronological.
    #[serde(default)]
    pub employment_history: Vec<EmploymentBlock>,
}

impl Employee {
    /// Returns the block representing the employee's present situation.
    ///
    /// See [`resolve_current_block`] for the selection rules.
    pub fn current_block(&self) -> Option<&EmploymentBlock> {
        resolve_current_block(self)
    }

    /// Iterates over every leave recorded against any block.
    pub fn leaves(&self) -> impl Iterator<Item = &Leave> {
        self.employment_history.iter().flat_map(|b| b.leaves.iter())
    }

    /// Iterates over every disciplinary action recorded against any block.
    pub fn disciplinary_actions(&self) -> impl Iterator<Item = &DisciplinaryAction> {
        self.employment_history
            .iter()
            .flat_map(|b| b.disciplinary_actions.iter())
    }

    /// Returns true if any leave in any block is in progress at `now`.
    ///
    /// # Examples
    ///
    /// ```
    /// use personnel_engine::models::{Employee, EmploymentBlock, Leave};
    /// use chrono::NaiveDate;
    ///
    /// let employee = Employee {
    ///     employment_history: vec![EmploymentBlock {
    ///         leaves: vec![Leave {
    ///             leave_type: Some("Medical Leave".to_string()),
    ///             start_date: Some("2024-01-10".to_string()),
    ///             end_date: None,
    ///             ..Default::default()
    ///         }],
    ///         ..Default::default()
    ///     }],
    ///     ..Default::default()
    /// };
    ///
    /// let now = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
    /// assert!(employee.is_on_leave(now));
    /// ```
    pub fn is_on_leave(&self, now: NaiveDateTime) -> bool {
        self.leaves().any(|leave| leave.is_active_at(now))
    }
}
