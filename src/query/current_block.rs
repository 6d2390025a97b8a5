//! Current employment block resolution.
//!
//! Employment history is supplied in caller order, which is not guaranteed to
//! be chronological, and the "currently working" flag is not guaranteed to be
//! unique. This module picks the single block that represents "now".

use chrono::NaiveDateTime;
use tracing::debug;

use crate::models::{Employee, EmploymentBlock};

use super::dates::parse_date;

/// Selects the employment block that represents the employee's present situation.
///
/// # Rules
///
/// 1. Empty history gives `None`.
/// 2. The first block flagged `is_currently_working` wins. If several are
///    flagged, the first in history order is taken; later flags are ignored.
/// 3. Otherwise the block with the latest effective date wins, where the
///    effective date is `status_date`, else `to_date`, else `from_date`
///    (blank counts as absent). A date that does not parse sorts before every
///    real date. Ties go to the block that appears first.
///
/// # Example
///
/// ```
/// use personnel_engine::models::{Employee, EmploymentBlock};
/// use personnel_engine::query::resolve_current_block;
///
/// let employee = Employee {
///     employment_history: vec![
///         EmploymentBlock {
///             id: Some("old".to_string()),
///             to_date: Some("2020-01-01".to_string()),
///             ..Default::default()
///         },
///         EmploymentBlock {
///             id: Some("new".to_string()),
///             from_date: Some("2021-06-01".to_string()),
///             ..Default::default()
///         },
///     ],
///     ..Default::default()
/// };
///
/// let current = resolve_current_block(&employee).unwrap();
/// assert_eq!(current.id.as_deref(), Some("new"));
/// ```
pub fn resolve_current_block(employee: &Employee) -> Option<&EmploymentBlock> {
    let history = &employee.employment_history;

    let mut flagged = history.iter().filter(|b| b.is_currently_working);
    if let Some(first) = flagged.next() {
        let extra = flagged.count();
        if extra > 0 {
            debug!(
                employee_id = employee.id.as_deref().unwrap_or_default(),
                flagged = extra + 1,
                "Multiple blocks flagged as currently working, using the first"
            );
        }
        return Some(first);
    }

    let mut latest: Option<(&EmploymentBlock, NaiveDateTime)> = None;
    for block in history {
        let date = effective_date(block);
        if latest.is_none_or(|(_, best)| date > best) {
            latest = Some((block, date));
        }
    }
    latest.map(|(block, _)| block)
}

/// The date a block is ranked by when no block is flagged as current.
fn effective_date(block: &EmploymentBlock) -> NaiveDateTime {
    [&block.status_date, &block.to_date, &block.from_date]
        .into_iter()
        .find_map(|d| d.as_deref().map(str::trim).filter(|d| !d.is_empty()))
        .and_then(parse_date)
        .unwrap_or(NaiveDateTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(id: &str) -> EmploymentBlock {
        EmploymentBlock {
            id: Some(id.to_string()),
            ..Default::default()
        }
    }

    fn employee(history: Vec<EmploymentBlock>) -> Employee {
        Employee {
            employment_history: history,
            ..Default::default()
        }
    }

    fn resolved_id(emp: &Employee) -> Option<&str> {
        resolve_current_block(emp).and_then(|b| b.id.as_deref())
    }

    #[test]
    fn test_empty_history_resolves_to_none() {
        assert!(resolve_current_block(&employee(vec![])).is_none());
    }

    #[test]
    fn test_flagged_block_wins_over_later_dates() {
        let emp = employee(vec![
            EmploymentBlock {
                from_date: Some("2024-01-01".to_string()),
                ..block("later")
            },
            EmploymentBlock {
                from_date: Some("2010-01-01".to_string()),
                is_currently_working: true,
                ..block("flagged")
            },
        ]);
        assert_eq!(resolved_id(&emp), Some("flagged"));
    }

    #[test]
    fn test_multiple_flags_take_first_in_order() {
        let emp = employee(vec![
            EmploymentBlock {
                from_date: Some("2010-01-01".to_string()),
                is_currently_working: true,
                ..block("first")
            },
            EmploymentBlock {
                from_date: Some("2024-01-01".to_string()),
                is_currently_working: true,
                ..block("second")
            },
        ]);
        assert_eq!(resolved_id(&emp), Some("first"));
    }

    #[test]
    fn test_later_from_date_beats_earlier_to_date() {
        let emp = employee(vec![
            EmploymentBlock {
                to_date: Some("2020-01-01".to_string()),
                ..block("a")
            },
            EmploymentBlock {
                from_date: Some("2021-06-01".to_string()),
                ..block("b")
            },
        ]);
        assert_eq!(resolved_id(&emp), Some("b"));
    }

    #[test]
    fn test_status_date_takes_priority_over_to_date() {
        // Block "a" ended long ago but its status changed recently.
        let emp = employee(vec![
            EmploymentBlock {
                from_date: Some("2000-01-01".to_string()),
                to_date: Some("2005-01-01".to_string()),
                status_date: Some("2023-03-01".to_string()),
                ..block("a")
            },
            EmploymentBlock {
                from_date: Some("2022-01-01".to_string()),
                ..block("b")
            },
        ]);
        assert_eq!(resolved_id(&emp), Some("a"));
    }

    #[test]
    fn test_blank_status_date_falls_through() {
        let emp = employee(vec![
            EmploymentBlock {
                status_date: Some("".to_string()),
                to_date: Some("2019-01-01".to_string()),
                ..block("a")
            },
            EmploymentBlock {
                from_date: Some("2020-01-01".to_string()),
                ..block("b")
            },
        ]);
        assert_eq!(resolved_id(&emp), Some("b"));
    }

    #[test]
    fn test_malformed_date_never_wins() {
        let emp = employee(vec![
            EmploymentBlock {
                status_date: Some("31/12/2099".to_string()),
                ..block("malformed")
            },
            EmploymentBlock {
                from_date: Some("1965-01-01".to_string()),
                ..block("old")
            },
        ]);
        assert_eq!(resolved_id(&emp), Some("old"));
    }

    #[test]
    fn test_ties_keep_original_order() {
        let emp = employee(vec![
            EmploymentBlock {
                from_date: Some("2020-01-01".to_string()),
                ..block("first")
            },
            EmploymentBlock {
                to_date: Some("2020-01-01".to_string()),
                ..block("second")
            },
        ]);
        assert_eq!(resolved_id(&emp), Some("first"));
    }

    #[test]
    fn test_no_usable_dates_falls_back_to_first_block() {
        let emp = employee(vec![block("first"), block("second"), block("third")]);
        assert_eq!(resolved_id(&emp), Some("first"));
    }
}
