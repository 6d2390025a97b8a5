//! Vocabulary types.
//!
//! This module contains the strongly-typed vocabulary structures that are
//! deserialized from YAML configuration files, and the [`Vocabulary`]
//! aggregate the engine consults.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::query::text::normalize;

/// The life-cycle category of a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    /// In service.
    Active,
    /// Not in service, not a rejoin candidate.
    Inactive,
    /// No further service change is possible (retired, deceased).
    Terminal,
    /// Returning to active service is administratively possible.
    Rejoinable,
    /// Not in the vocabulary.
    Other,
}

/// A status with its canonical display name and category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusEntry {
    /// Canonical display name, e.g. "OSD".
    pub name: String,
    /// Life-cycle category.
    pub category: StatusCategory,
}

/// statuses.yaml file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusesConfig {
    /// Every known status, in display order.
    pub statuses: Vec<StatusEntry>,
}

/// leave_types.yaml file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveTypesConfig {
    /// Every known leave type, in display order.
    pub leave_types: Vec<String>,
    /// Highest pay scale grade.
    pub max_grade: u32,
}

/// The closed status, leave-type and pay-grade vocabularies.
///
/// Lookups are normalized (trimmed and lowercased), so "OSD", " osd " and
/// "Osd" all resolve to the same entry.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    statuses: Vec<StatusEntry>,
    status_index: HashMap<String, usize>,
    leave_types: Vec<String>,
    leave_type_index: HashMap<String, usize>,
    max_grade: u32,
}

impl Vocabulary {
    /// Builds a vocabulary from its component parts.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidVocabulary`] if there are no statuses, a
    /// name is blank, or two names normalize to the same key.
    pub fn new(statuses: StatusesConfig, leave_types: LeaveTypesConfig) -> EngineResult<Self> {
        if statuses.statuses.is_empty() {
            return Err(EngineError::InvalidVocabulary {
                message: "status list is empty".to_string(),
            });
        }

        let status_index = index_names(statuses.statuses.iter().map(|s| s.name.as_str()), "status")?;
        let leave_type_index =
            index_names(leave_types.leave_types.iter().map(String::as_str), "leave type")?;

        Ok(Self {
            statuses: statuses.statuses,
            status_index,
            leave_types: leave_types.leave_types,
            leave_type_index,
            max_grade: leave_types.max_grade,
        })
    }

    /// Returns every status in display order.
    pub fn statuses(&self) -> &[StatusEntry] {
        &self.statuses
    }

    /// Returns the canonical display names of every status.
    pub fn status_options(&self) -> Vec<&str> {
        self.statuses.iter().map(|s| s.name.as_str()).collect()
    }

    /// Returns the canonical spelling of `status`, if it is known.
    pub fn canonical_status(&self, status: &str) -> Option<&str> {
        self.status_index
            .get(&normalize(Some(status)))
            .map(|&i| self.statuses[i].name.as_str())
    }

    /// Returns the category of `status`; unknown or blank statuses are [`StatusCategory::Other`].
    ///
    /// # Example
    ///
    /// ```
    /// use personnel_engine::config::{StatusCategory, Vocabulary};
    ///
    /// let vocabulary = Vocabulary::builtin();
    /// assert_eq!(vocabulary.category(" osd "), StatusCategory::Rejoinable);
    /// assert_eq!(vocabulary.category("Retired"), StatusCategory::Terminal);
    /// assert_eq!(vocabulary.category("Promoted"), StatusCategory::Other);
    /// ```
    pub fn category(&self, status: &str) -> StatusCategory {
        self.status_index
            .get(&normalize(Some(status)))
            .map_or(StatusCategory::Other, |&i| self.statuses[i].category)
    }

    /// Returns true if `status` is terminal.
    pub fn is_terminal(&self, status: &str) -> bool {
        self.category(status) == StatusCategory::Terminal
    }

    /// Returns true if `status` is rejoinable.
    pub fn is_rejoinable(&self, status: &str) -> bool {
        self.category(status) == StatusCategory::Rejoinable
    }

    /// Returns every leave type in display order.
    pub fn leave_types(&self) -> &[String] {
        &self.leave_types
    }

    /// Returns the canonical spelling of `leave_type`, if it is known.
    pub fn canonical_leave_type(&self, leave_type: &str) -> Option<&str> {
        self.leave_type_index
            .get(&normalize(Some(leave_type)))
            .map(|&i| self.leave_types[i].as_str())
    }

    /// Returns the pay scale grades, "BPS-1" through "BPS-<max>".
    pub fn bps_grades(&self) -> Vec<String> {
        (1..=self.max_grade).map(|g| format!("BPS-{}", g)).collect()
    }
}

fn index_names<'a>(
    names: impl Iterator<Item = &'a str>,
    kind: &str,
) -> EngineResult<HashMap<String, usize>> {
    let mut index = HashMap::new();
    for (i, name) in names.enumerate() {
        let key = normalize(Some(name));
        if key.is_empty() {
            return Err(EngineError::InvalidVocabulary {
                message: format!("blank {} at position {}", kind, i),
            });
        }
        if index.insert(key.clone(), i).is_some() {
            return Err(EngineError::InvalidVocabulary {
                message: format!("duplicate {} '{}'", kind, key),
            });
        }
    }
    Ok(index)
}
