//! Multi-criteria employee filtering.
//!
//! A [`FilterSpec`] is compiled once per call into normalized values and
//! parsed bounds, then tested against each employee. Criteria combine with
//! AND; a field's set of values combines with OR. Anything that cannot be read
//! (a malformed date, a missing block, a missing status) excludes the
//! employee from that criterion. Nothing here fails or mutates its input.

use chrono::{NaiveDateTime, Utc};
use tracing::{debug, trace};

use crate::models::{Criterion, Employee, EmploymentBlock, FilterSpec, OneOrMany, has_values, is_set};

use super::current_block::resolve_current_block;
use super::dates::{DateBounds, parse_date, parse_optional};
use super::leave_window::LeaveWindow;
use super::text::{digits, normalize};

/// Returns the employees matching every active criterion of `spec`.
///
/// The result is a subsequence of `population` in its original order. The
/// active-leave criterion is evaluated against the current UTC time; use
/// [`filter_employees_at`] to fix the clock.
///
/// # Example
///
/// ```
/// use personnel_engine::models::{Employee, FilterSpec};
/// use personnel_engine::query::filter_employees;
///
/// let population: Vec<Employee> = serde_json::from_value(serde_json::json!([
///     { "fullName": "Ayesha Bibi", "cnic": "36302-1234567-2", "gender": "Female" },
///     { "fullName": "Muhammad Ali", "cnic": "36302-7654321-1", "gender": "Male" }
/// ]))
/// .unwrap();
///
/// let spec = FilterSpec {
///     query: Some("363027654321".to_string()),
///     ..Default::default()
/// };
/// let matched = filter_employees(&population, &spec);
/// assert_eq!(matched.len(), 1);
/// assert_eq!(matched[0].full_name.as_deref(), Some("Muhammad Ali"));
/// ```
pub fn filter_employees<'a>(population: &'a [Employee], spec: &FilterSpec) -> Vec<&'a Employee> {
    filter_employees_at(population, spec, Utc::now().naive_utc())
}

/// Like [`filter_employees`], with `now` used for the active-leave criterion.
pub fn filter_employees_at<'a>(
    population: &'a [Employee],
    spec: &FilterSpec,
    now: NaiveDateTime,
) -> Vec<&'a Employee> {
    let filter = CompiledFilter::new(spec, now);
    debug!(
        population = population.len(),
        criteria = ?spec.active_criteria(),
        "Filtering employees"
    );

    let matched: Vec<&Employee> = population
        .iter()
        .filter(|employee| match filter.rejection(employee) {
            None => true,
            Some(criterion) => {
                trace!(
                    employee_id = employee.id.as_deref().unwrap_or_default(),
                    %criterion,
                    "Employee excluded"
                );
                false
            }
        })
        .collect();

    debug!(matched = matched.len(), "Filter complete");
    matched
}

/// Returns the first criterion, in evaluation order, that excludes `employee`.
///
/// `None` means the employee matches `spec`.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use personnel_engine::models::{Criterion, Employee, FilterSpec};
/// use personnel_engine::query::explain_rejection;
///
/// let now = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let employee = Employee {
///     gender: Some("Female".to_string()),
///     ..Default::default()
/// };
/// let spec = FilterSpec {
///     gender: Some("female".into()),
///     hq_id: Some("3".into()),
///     ..Default::default()
/// };
///
/// // No employment history, so no block to test the headquarters against.
/// assert_eq!(explain_rejection(&employee, &spec, now), Some(Criterion::CurrentBlock));
/// ```
pub fn explain_rejection(
    employee: &Employee,
    spec: &FilterSpec,
    now: NaiveDateTime,
) -> Option<Criterion> {
    CompiledFilter::new(spec, now).rejection(employee)
}

/// Free-text query, pre-normalized.
#[derive(Debug)]
struct TextQuery {
    text: String,
    digits: String,
}

impl TextQuery {
    fn matches(&self, employee: &Employee) -> bool {
        let in_text = [&employee.full_name, &employee.father_name, &employee.cnic]
            .into_iter()
            .any(|field| normalize(field.as_deref()).contains(&self.text));
        if in_text {
            return true;
        }
        !self.digits.is_empty()
            && digits(employee.cnic.as_deref().unwrap_or_default()).contains(&self.digits)
    }
}

/// The leave criterion: optional type set plus a date window.
#[derive(Debug)]
struct LeaveCriterion {
    types: Option<Vec<String>>,
    window: LeaveWindow,
}

impl LeaveCriterion {
    fn matches(&self, employee: &Employee) -> bool {
        employee.leaves().any(|leave| {
            let type_ok = self.types.as_ref().is_none_or(|types| {
                let leave_type = normalize(leave.leave_type.as_deref());
                types.iter().any(|t| *t == leave_type)
            });
            type_ok && self.window.admits(leave)
        })
    }
}

/// A [`FilterSpec`] with every value normalized and every bound parsed.
///
/// A field is `None` when its criterion is not active.
#[derive(Debug)]
struct CompiledFilter {
    query: Option<TextQuery>,
    gender: Option<Vec<String>>,
    domicile: Option<Vec<String>>,
    sect: Option<Vec<String>>,
    date_of_birth: Option<DateBounds>,
    date_of_appointment: Option<DateBounds>,
    status: Option<Vec<String>>,
    status_date: Option<DateBounds>,
    hq_id: Option<Vec<String>>,
    tehsil_id: Option<Vec<String>>,
    designation_id: Option<Vec<String>>,
    unit_id: Option<Vec<String>>,
    category_id: Option<Vec<String>>,
    posting_place: Option<Vec<String>>,
    bps_grade: Option<Vec<String>>,
    since: Option<NaiveDateTime>,
    active_leave_at: Option<NaiveDateTime>,
    leave: Option<LeaveCriterion>,
    disciplinary: Option<DateBounds>,
}

impl CompiledFilter {
    fn new(spec: &FilterSpec, now: NaiveDateTime) -> Self {
        let query = {
            let text = normalize(spec.query.as_deref());
            (!text.is_empty()).then(|| TextQuery {
                digits: digits(&text),
                text,
            })
        };

        let leave_active = has_values(spec.leave_type.as_ref())
            || is_set(spec.leave_from_date.as_deref())
            || is_set(spec.leave_to_date.as_deref());

        Self {
            query,
            gender: value_set(spec.gender.as_ref(), normalize_value),
            domicile: value_set(spec.domicile.as_ref(), normalize_value),
            sect: value_set(spec.sect.as_ref(), normalize_value),
            date_of_birth: bounds(spec.dob_from.as_deref(), spec.dob_to.as_deref()),
            date_of_appointment: bounds(spec.doa_from.as_deref(), spec.doa_to.as_deref()),
            status: value_set(spec.status.as_ref(), normalize_value),
            status_date: bounds(
                spec.status_date_from.as_deref(),
                spec.status_date_to.as_deref(),
            ),
            hq_id: value_set(spec.hq_id.as_ref(), str::to_string),
            tehsil_id: value_set(spec.tehsil_id.as_ref(), str::to_string),
            designation_id: value_set(spec.designation_id.as_ref(), str::to_string),
            unit_id: value_set(spec.unit_id.as_ref(), str::to_string),
            category_id: value_set(spec.category_id.as_ref(), str::to_string),
            posting_place: value_set(spec.posting_place.as_ref(), normalize_value),
            bps_grade: value_set(spec.bps_grade.as_ref(), digits),
            since: spec.since_date.as_deref().and_then(parse_date),
            active_leave_at: spec.active_leave_only.then_some(now),
            leave: leave_active.then(|| LeaveCriterion {
                types: value_set(spec.leave_type.as_ref(), normalize_value),
                window: LeaveWindow::parse(
                    spec.leave_from_date.as_deref(),
                    spec.leave_to_date.as_deref(),
                ),
            }),
            disciplinary: bounds(
                spec.disciplinary_from_date.as_deref(),
                spec.disciplinary_to_date.as_deref(),
            ),
        }
    }

    fn needs_block(&self) -> bool {
        self.hq_id.is_some()
            || self.tehsil_id.is_some()
            || self.designation_id.is_some()
            || self.unit_id.is_some()
            || self.category_id.is_some()
            || self.posting_place.is_some()
            || self.bps_grade.is_some()
    }

    fn rejection(&self, employee: &Employee) -> Option<Criterion> {
        if let Some(query) = &self.query {
            if !query.matches(employee) {
                return Some(Criterion::Query);
            }
        }

        let scalars = [
            (Criterion::Gender, &self.gender, &employee.gender),
            (Criterion::Domicile, &self.domicile, &employee.domicile),
            (Criterion::Sect, &self.sect, &employee.sect),
        ];
        for (criterion, wanted, actual) in scalars {
            if let Some(wanted) = wanted {
                let actual = normalize(actual.as_deref());
                if !wanted.iter().any(|w| *w == actual) {
                    return Some(criterion);
                }
            }
        }

        if let Some(range) = &self.date_of_birth {
            if !range.contains_raw(employee.dob.as_deref()) {
                return Some(Criterion::DateOfBirth);
            }
        }
        if let Some(range) = &self.date_of_appointment {
            if !range.contains_raw(employee.date_of_appointment.as_deref()) {
                return Some(Criterion::DateOfAppointment);
            }
        }

        let block = resolve_current_block(employee);
        if self.needs_block() && block.is_none() {
            return Some(Criterion::CurrentBlock);
        }

        if let Some(wanted) = &self.status {
            let held: Vec<String> = [
                employee.status.as_deref(),
                block.and_then(|b| b.status.as_deref()),
            ]
            .into_iter()
            .map(normalize)
            .filter(|s| !s.is_empty())
            .collect();

            let matched = wanted.iter().any(|w| {
                held.iter()
                    .any(|h| h == w || h.contains(w.as_str()) || w.contains(h.as_str()))
            });
            if !matched {
                return Some(Criterion::Status);
            }
        }

        if let Some(range) = &self.status_date {
            let raw = non_blank(block.and_then(|b| b.status_date.as_deref()))
                .or(employee.updated_at.as_deref());
            if !range.contains_raw(raw) {
                return Some(Criterion::StatusDate);
            }
        }

        if let Some(block) = block {
            if let Some(rejected) = self.block_rejection(block) {
                return Some(rejected);
            }
        }

        if let Some(since) = self.since {
            let raw = non_blank(block.and_then(|b| b.from_date.as_deref()))
                .or(employee.created_at.as_deref());
            if parse_optional(raw).is_none_or(|start| start < since) {
                return Some(Criterion::SinceDate);
            }
        }

        if let Some(now) = self.active_leave_at {
            if !employee.is_on_leave(now) {
                return Some(Criterion::ActiveLeave);
            }
        }

        if let Some(leave) = &self.leave {
            if !leave.matches(employee) {
                return Some(Criterion::Leave);
            }
        }

        if let Some(range) = &self.disciplinary {
            let any = employee
                .disciplinary_actions()
                .any(|action| range.contains_raw(action.action_date.as_deref()));
            if !any {
                return Some(Criterion::Disciplinary);
            }
        }

        None
    }

    /// Tests the block-scoped identifiers, posting place and pay grade.
    fn block_rejection(&self, block: &EmploymentBlock) -> Option<Criterion> {
        let ids = [
            (Criterion::HeadquartersId, &self.hq_id, &block.hq_id),
            (Criterion::TehsilId, &self.tehsil_id, &block.tehsil_id),
            (Criterion::DesignationId, &self.designation_id, &block.designation_id),
            (Criterion::UnitId, &self.unit_id, &block.unit_id),
            (
                Criterion::PostingCategoryId,
                &self.category_id,
                &block.posting_category_id,
            ),
        ];
        for (criterion, wanted, actual) in ids {
            if let Some(wanted) = wanted {
                let actual = actual.as_deref().map(str::trim);
                if !wanted.iter().any(|w| Some(w.as_str()) == actual) {
                    return Some(criterion);
                }
            }
        }

        if let Some(places) = &self.posting_place {
            let title = normalize(block.posting_place_title.as_deref());
            if !places.iter().any(|p| title.contains(p.as_str())) {
                return Some(Criterion::PostingPlace);
            }
        }

        if let Some(grades) = &self.bps_grade {
            // Digit containment: "17" also matches a wanted "7" or "1".
            let grade = digits(block.bps.as_deref().unwrap_or_default());
            if !grades.iter().any(|g| grade.contains(g.as_str())) {
                return Some(Criterion::BpsGrade);
            }
        }

        None
    }
}

fn normalize_value(value: &str) -> String {
    normalize(Some(value))
}

/// The non-blank values of a set criterion, mapped; `None` if there are none.
fn value_set(values: Option<&OneOrMany>, map: impl Fn(&str) -> String) -> Option<Vec<String>> {
    let set: Vec<String> = values?.values().map(map).collect();
    (!set.is_empty()).then_some(set)
}

/// Active when either bound is non-blank, even if neither parses.
fn bounds(from: Option<&str>, to: Option<&str>) -> Option<DateBounds> {
    (is_set(from) || is_set(to)).then(|| DateBounds::parse(from, to))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn emp(value: serde_json::Value) -> Employee {
        serde_json::from_value(value).unwrap()
    }

    fn rejection(employee: &Employee, spec: FilterSpec) -> Option<Criterion> {
        explain_rejection(employee, &spec, now())
    }

    fn posted(block: serde_json::Value) -> Employee {
        emp(json!({
            "fullName": "Test Employee",
            "employmentHistory": [block]
        }))
    }

    // -------------------------------------------------------------------------
    // Free text
    // -------------------------------------------------------------------------

    #[test]
    fn test_query_matches_name_case_insensitively() {
        let e = emp(json!({ "fullName": "Muhammad Ali", "fatherName": "Ahmad Din" }));
        for q in ["muhammad", "  ALI ", "ahmad din"] {
            let spec = FilterSpec {
                query: Some(q.to_string()),
                ..Default::default()
            };
            assert_eq!(rejection(&e, spec), None, "{:?}", q);
        }
    }

    #[test]
    fn test_query_matches_cnic_with_or_without_separators() {
        let e = emp(json!({ "fullName": "Muhammad Ali", "cnic": "36302-1234567-1" }));
        for q in ["363021234567", "36302-1234567-1", "1234567-1"] {
            let spec = FilterSpec {
                query: Some(q.to_string()),
                ..Default::default()
            };
            assert_eq!(rejection(&e, spec), None, "{:?}", q);
        }
    }

    #[test]
    fn test_query_without_match_rejected() {
        let e = emp(json!({ "fullName": "Muhammad Ali", "cnic": "36302-1234567-1" }));
        let spec = FilterSpec {
            query: Some("Bibi".to_string()),
            ..Default::default()
        };
        assert_eq!(rejection(&e, spec), Some(Criterion::Query));

        let spec = FilterSpec {
            query: Some("99999".to_string()),
            ..Default::default()
        };
        assert_eq!(rejection(&e, spec), Some(Criterion::Query));
    }

    // -------------------------------------------------------------------------
    // Employee-level scalars and ranges
    // -------------------------------------------------------------------------

    #[test]
    fn test_scalar_single_and_set() {
        let e = emp(json!({ "gender": "Female", "domicile": "Multan", "sect": "Muslim" }));

        let spec = FilterSpec {
            gender: Some("female".into()),
            domicile: Some(vec!["Lahore", "MULTAN"].into()),
            ..Default::default()
        };
        assert_eq!(rejection(&e, spec), None);

        let spec = FilterSpec {
            sect: Some(vec!["Christian", "Hindu"].into()),
            ..Default::default()
        };
        assert_eq!(rejection(&e, spec), Some(Criterion::Sect));
    }

    #[test]
    fn test_scalar_missing_attribute_rejected() {
        let e = emp(json!({ "fullName": "No Gender" }));
        let spec = FilterSpec {
            gender: Some("Male".into()),
            ..Default::default()
        };
        assert_eq!(rejection(&e, spec), Some(Criterion::Gender));
    }

    #[test]
    fn test_date_of_birth_range_inclusive() {
        let e = emp(json!({ "dob": "1985-03-15" }));
        let spec = FilterSpec {
            dob_from: Some("1985-03-15".to_string()),
            dob_to: Some("1990-01-01".to_string()),
            ..Default::default()
        };
        assert_eq!(rejection(&e, spec), None);

        let spec = FilterSpec {
            dob_to: Some("1985-03-14".to_string()),
            ..Default::default()
        };
        assert_eq!(rejection(&e, spec), Some(Criterion::DateOfBirth));
    }

    #[test]
    fn test_unparseable_record_date_excluded_when_range_active() {
        let e = emp(json!({ "dob": "15/03/1985", "dateOfAppointment": "2010-01-01" }));
        let spec = FilterSpec {
            dob_from: Some("1900-01-01".to_string()),
            ..Default::default()
        };
        assert_eq!(rejection(&e, spec), Some(Criterion::DateOfBirth));

        let spec = FilterSpec {
            doa_from: Some("garbage".to_string()),
            ..Default::default()
        };
        assert_eq!(rejection(&e, spec), None);
    }

    // -------------------------------------------------------------------------
    // Block-scoped criteria
    // -------------------------------------------------------------------------

    #[test]
    fn test_block_ids_trimmed_exact_match() {
        let e = posted(json!({
            "hqId": " 3 ", "tehsilId": 12, "designationId": "7",
            "unitId": "u-1", "postingCategoryId": "9",
            "isCurrentlyWorking": true
        }));
        let spec = FilterSpec {
            hq_id: Some("3".into()),
            tehsil_id: Some(vec!["11", "12"].into()),
            designation_id: Some(" 7".into()),
            unit_id: Some("u-1".into()),
            category_id: Some("9".into()),
            ..Default::default()
        };
        assert_eq!(rejection(&e, spec), None);

        let spec = FilterSpec {
            designation_id: Some("77".into()),
            ..Default::default()
        };
        assert_eq!(rejection(&e, spec), Some(Criterion::DesignationId));
    }

    #[test]
    fn test_block_criteria_use_resolved_block_only() {
        let e = emp(json!({
            "employmentHistory": [
                { "hqId": "1", "fromDate": "2010-01-01", "toDate": "2015-01-01" },
                { "hqId": "2", "fromDate": "2015-01-02" }
            ]
        }));
        let old_hq = FilterSpec {
            hq_id: Some("1".into()),
            ..Default::default()
        };
        assert_eq!(rejection(&e, old_hq), Some(Criterion::HeadquartersId));

        let new_hq = FilterSpec {
            hq_id: Some("2".into()),
            ..Default::default()
        };
        assert_eq!(rejection(&e, new_hq), None);
    }

    #[test]
    fn test_block_criterion_without_history_rejected() {
        let e = emp(json!({ "fullName": "Unposted" }));
        for spec in [
            FilterSpec {
                unit_id: Some("1".into()),
                ..Default::default()
            },
            FilterSpec {
                posting_place: Some("court".into()),
                ..Default::default()
            },
            FilterSpec {
                bps_grade: Some("BPS".into()),
                ..Default::default()
            },
        ] {
            assert_eq!(rejection(&e, spec), Some(Criterion::CurrentBlock));
        }
    }

    #[test]
    fn test_posting_place_substring() {
        let e = posted(json!({ "postingPlaceTitle": "Civil Court Multan" }));
        let spec = FilterSpec {
            posting_place: Some(vec!["lahore", " court mul"].into()),
            ..Default::default()
        };
        assert_eq!(rejection(&e, spec), None);

        let spec = FilterSpec {
            posting_place: Some("session".into()),
            ..Default::default()
        };
        assert_eq!(rejection(&e, spec), Some(Criterion::PostingPlace));
    }

    #[test]
    fn test_bps_digit_containment() {
        let e = posted(json!({ "bps": "BPS-17" }));
        for wanted in ["17", "BPS-17", "bps17", "7", "1"] {
            let spec = FilterSpec {
                bps_grade: Some(wanted.into()),
                ..Default::default()
            };
            assert_eq!(rejection(&e, spec), None, "{:?}", wanted);
        }
        for wanted in ["16", "BPS-18", "71"] {
            let spec = FilterSpec {
                bps_grade: Some(wanted.into()),
                ..Default::default()
            };
            assert_eq!(rejection(&e, spec), Some(Criterion::BpsGrade), "{:?}", wanted);
        }
    }

    #[test]
    fn test_bps_without_digits_matches_any_block() {
        let e = posted(json!({ "bps": "BPS-11" }));
        let spec = FilterSpec {
            bps_grade: Some("BPS".into()),
            ..Default::default()
        };
        assert_eq!(rejection(&e, spec), None);
    }

    // -------------------------------------------------------------------------
    // Status
    // -------------------------------------------------------------------------

    #[test]
    fn test_status_matches_employee_or_block() {
        let e = emp(json!({
            "status": "Active",
            "employmentHistory": [{ "status": "OSD", "isCurrentlyWorking": true }]
        }));
        for wanted in ["active", "osd", " OSD "] {
            let spec = FilterSpec {
                status: Some(wanted.into()),
                ..Default::default()
            };
            assert_eq!(rejection(&e, spec), None, "{:?}", wanted);
        }
        let spec = FilterSpec {
            status: Some(vec!["Retired", "Deceased"].into()),
            ..Default::default()
        };
        assert_eq!(rejection(&e, spec), Some(Criterion::Status));
    }

    #[test]
    fn test_status_matches_by_containment_both_ways() {
        let e = emp(json!({ "status": "In-Service" }));
        let spec = FilterSpec {
            status: Some("service".into()),
            ..Default::default()
        };
        assert_eq!(rejection(&e, spec), None);

        let e = emp(json!({ "status": "Active" }));
        let spec = FilterSpec {
            status: Some("inactive".into()),
            ..Default::default()
        };
        // "inactive" contains "active".
        assert_eq!(rejection(&e, spec), None);
    }

    #[test]
    fn test_status_missing_everywhere_rejected() {
        let e = emp(json!({ "employmentHistory": [{ "fromDate": "2020-01-01" }] }));
        let spec = FilterSpec {
            status: Some("Active".into()),
            ..Default::default()
        };
        assert_eq!(rejection(&e, spec), Some(Criterion::Status));
    }

    #[test]
    fn test_status_date_falls_back_to_updated_at() {
        let e = emp(json!({
            "updatedAt": "2024-03-05T08:00:00Z",
            "employmentHistory": [{ "statusDate": "", "fromDate": "2020-01-01" }]
        }));
        let spec = FilterSpec {
            status_date_from: Some("2024-03-01".to_string()),
            status_date_to: Some("2024-03-31".to_string()),
            ..Default::default()
        };
        assert_eq!(rejection(&e, spec), None);

        let e = emp(json!({
            "updatedAt": "2024-03-05T08:00:00Z",
            "employmentHistory": [{ "statusDate": "2023-01-01" }]
        }));
        let spec = FilterSpec {
            status_date_from: Some("2024-03-01".to_string()),
            ..Default::default()
        };
        assert_eq!(rejection(&e, spec), Some(Criterion::StatusDate));
    }

    // -------------------------------------------------------------------------
    // Since cutoff
    // -------------------------------------------------------------------------

    #[test]
    fn test_since_uses_block_from_date() {
        let e = posted(json!({ "fromDate": "2023-05-01" }));
        let on_or_after = FilterSpec {
            since_date: Some("2023-05-01".to_string()),
            ..Default::default()
        };
        assert_eq!(rejection(&e, on_or_after), None);

        let later = FilterSpec {
            since_date: Some("2023-06-01".to_string()),
            ..Default::default()
        };
        assert_eq!(rejection(&e, later), Some(Criterion::SinceDate));
    }

    #[test]
    fn test_since_falls_back_to_created_at() {
        let e = emp(json!({ "createdAt": "2024-01-10T00:00:00Z" }));
        let spec = FilterSpec {
            since_date: Some("2024-01-01".to_string()),
            ..Default::default()
        };
        assert_eq!(rejection(&e, spec), None);

        let undated = emp(json!({ "fullName": "Undated" }));
        let spec = FilterSpec {
            since_date: Some("2024-01-01".to_string()),
            ..Default::default()
        };
        assert_eq!(rejection(&undated, spec), Some(Criterion::SinceDate));
    }

    #[test]
    fn test_unparseable_since_is_no_constraint() {
        let undated = emp(json!({ "fullName": "Undated" }));
        let spec = FilterSpec {
            since_date: Some("last year".to_string()),
            ..Default::default()
        };
        assert_eq!(rejection(&undated, spec), None);
    }

    // -------------------------------------------------------------------------
    // Leaves and disciplinary actions
    // -------------------------------------------------------------------------

    #[test]
    fn test_active_leave_only() {
        let on_leave = posted(json!({
            "leaves": [{ "type": "Medical Leave", "startDate": "2024-05-20", "endDate": "2024-06-10" }]
        }));
        let back = posted(json!({
            "leaves": [{ "type": "Medical Leave", "startDate": "2024-05-01", "endDate": "2024-05-10" }]
        }));
        let spec = FilterSpec {
            active_leave_only: true,
            ..Default::default()
        };
        assert_eq!(rejection(&on_leave, spec.clone()), None);
        assert_eq!(rejection(&back, spec), Some(Criterion::ActiveLeave));
    }

    #[test]
    fn test_leave_from_date_against_end_date() {
        let e = posted(json!({
            "leaves": [{ "type": "Earned Leave", "startDate": "2024-01-10", "endDate": "2024-01-20" }]
        }));
        let spec = FilterSpec {
            leave_from_date: Some("2024-01-15".to_string()),
            ..Default::default()
        };
        assert_eq!(rejection(&e, spec), None);

        let spec = FilterSpec {
            leave_from_date: Some("2024-01-25".to_string()),
            ..Default::default()
        };
        assert_eq!(rejection(&e, spec), Some(Criterion::Leave));
    }

    #[test]
    fn test_leave_type_must_match_same_leave_as_window() {
        let e = emp(json!({
            "employmentHistory": [
                { "leaves": [{ "type": "Casual Leave", "startDate": "2024-01-10", "endDate": "2024-01-12" }] },
                { "leaves": [{ "type": "Medical Leave", "startDate": "2022-01-10", "endDate": "2022-01-12" }] }
            ]
        }));
        let spec = FilterSpec {
            leave_type: Some("medical leave".into()),
            leave_from_date: Some("2024-01-01".to_string()),
            ..Default::default()
        };
        assert_eq!(rejection(&e, spec), Some(Criterion::Leave));

        let spec = FilterSpec {
            leave_type: Some(vec!["Casual Leave", "Study Leave"].into()),
            leave_from_date: Some("2024-01-01".to_string()),
            ..Default::default()
        };
        assert_eq!(rejection(&e, spec), None);
    }

    #[test]
    fn test_leave_type_only_requires_parseable_start() {
        let e = posted(json!({ "leaves": [{ "type": "Hajj Leave", "startDate": "TBD" }] }));
        let spec = FilterSpec {
            leave_type: Some("Hajj Leave".into()),
            ..Default::default()
        };
        assert_eq!(rejection(&e, spec), Some(Criterion::Leave));
    }

    #[test]
    fn test_disciplinary_range() {
        let e = emp(json!({
            "employmentHistory": [
                { "disciplinaryActions": [{ "actionDate": "bad" }] },
                { "disciplinaryActions": [{ "actionDate": "2022-08-01", "decision": "Censure" }] }
            ]
        }));
        let spec = FilterSpec {
            disciplinary_from_date: Some("2022-01-01".to_string()),
            disciplinary_to_date: Some("2022-12-31".to_string()),
            ..Default::default()
        };
        assert_eq!(rejection(&e, spec), None);

        let spec = FilterSpec {
            disciplinary_to_date: Some("2022-07-31".to_string()),
            ..Default::default()
        };
        assert_eq!(rejection(&e, spec), Some(Criterion::Disciplinary));
    }

    #[test]
    fn test_no_disciplinary_actions_rejected() {
        let e = posted(json!({ "fromDate": "2020-01-01" }));
        let spec = FilterSpec {
            disciplinary_from_date: Some("2000-01-01".to_string()),
            ..Default::default()
        };
        assert_eq!(rejection(&e, spec), Some(Criterion::Disciplinary));
    }

    // -------------------------------------------------------------------------
    // Population-level behaviour
    // -------------------------------------------------------------------------

    #[test]
    fn test_empty_spec_returns_everyone_in_order() {
        let population = vec![
            emp(json!({ "id": "1" })),
            emp(json!({ "id": "2", "dob": "garbage" })),
            emp(json!({ "id": "3" })),
        ];
        let matched = filter_employees_at(&population, &FilterSpec::default(), now());
        let ids: Vec<_> = matched.iter().filter_map(|e| e.id.as_deref()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_filter_preserves_order_and_identity() {
        let population = vec![
            emp(json!({ "id": "a", "gender": "Male" })),
            emp(json!({ "id": "b", "gender": "Female" })),
            emp(json!({ "id": "c", "gender": "Male" })),
        ];
        let spec = FilterSpec {
            gender: Some("male".into()),
            ..Default::default()
        };
        let matched = filter_employees_at(&population, &spec, now());
        assert_eq!(matched.len(), 2);
        assert!(std::ptr::eq(matched[0], &population[0]));
        assert!(std::ptr::eq(matched[1], &population[2]));
    }

    #[test]
    fn test_empty_population() {
        let spec = FilterSpec {
            gender: Some("male".into()),
            ..Default::default()
        };
        assert!(filter_employees(&[], &spec).is_empty());
    }
}
