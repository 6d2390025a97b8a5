//! Rejoin eligibility classification.
//!
//! Decides whether an employee's current life-cycle state permits a "rejoin"
//! action. The status recorded on the current employment block is consulted
//! first; the employee's top-level status is only a fallback.

use serde::Serialize;
use tracing::debug;

use crate::config::{StatusCategory, Vocabulary};
use crate::models::Employee;

use super::current_block::resolve_current_block;
use super::text::normalize;

const SUSPENDED: &str = "suspended";

/// Which rule decided an employee's rejoin eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejoinDecision {
    /// The current block's status is terminal (retired, deceased).
    TerminalBlockStatus,
    /// The current block's status is rejoinable.
    RejoinableBlockStatus,
    /// Neither the block nor the employee carries a usable status.
    NoTopLevelStatus,
    /// The top-level status is an active status.
    TopLevelActive,
    /// The top-level status is terminal or inactive.
    TopLevelRetiredOrInactive,
    /// Top-level status is suspended and the block's status is rejoinable.
    ///
    /// Shadowed by [`RejoinDecision::RejoinableBlockStatus`], which is checked
    /// first, so [`classify_rejoin`] never returns it today.
    SuspendedWithRejoinableBlock,
    /// Any other status.
    NotRejoinable,
}

impl RejoinDecision {
    /// Returns true if this decision permits a rejoin.
    pub fn allows_rejoin(self) -> bool {
        matches!(
            self,
            RejoinDecision::RejoinableBlockStatus | RejoinDecision::SuspendedWithRejoinableBlock
        )
    }
}

/// Returns true if the employee may rejoin, using the built-in vocabulary.
///
/// # Example
///
/// ```
/// use personnel_engine::models::{Employee, EmploymentBlock};
/// use personnel_engine::query::can_rejoin;
///
/// let suspended = Employee {
///     status: Some("Active".to_string()),
///     employment_history: vec![EmploymentBlock {
///         status: Some("Suspended".to_string()),
///         is_currently_working: true,
///         ..Default::default()
///     }],
///     ..Default::default()
/// };
/// assert!(can_rejoin(&suspended));
/// assert!(!can_rejoin(&Employee::default()));
/// ```
pub fn can_rejoin(employee: &Employee) -> bool {
    can_rejoin_with(employee, Vocabulary::builtin())
}

/// Returns true if the employee may rejoin under `vocabulary`.
pub fn can_rejoin_with(employee: &Employee, vocabulary: &Vocabulary) -> bool {
    classify_rejoin(employee, vocabulary).allows_rejoin()
}

/// Classifies the employee's rejoin eligibility and names the deciding rule.
///
/// # Rules
///
/// 1. Take the status of the current block (see
///    [`resolve_current_block`](super::resolve_current_block)); empty if none.
/// 2. Terminal block status: no rejoin.
/// 3. Rejoinable block status: rejoin.
/// 4. Otherwise fall back to the top-level status: empty, active, terminal
///    or inactive all deny; "suspended" permits only with a rejoinable block
///    status; anything else denies.
pub fn classify_rejoin(employee: &Employee, vocabulary: &Vocabulary) -> RejoinDecision {
    let block_status = resolve_current_block(employee)
        .and_then(|b| b.status.as_deref())
        .unwrap_or_default();
    let block_category = vocabulary.category(block_status);

    let decision = match block_category {
        StatusCategory::Terminal => RejoinDecision::TerminalBlockStatus,
        StatusCategory::Rejoinable => RejoinDecision::RejoinableBlockStatus,
        _ => classify_top_level(employee.status.as_deref(), block_category, vocabulary),
    };

    debug!(
        employee_id = employee.id.as_deref().unwrap_or_default(),
        block_status,
        ?decision,
        "Classified rejoin eligibility"
    );
    decision
}

fn classify_top_level(
    status: Option<&str>,
    block_category: StatusCategory,
    vocabulary: &Vocabulary,
) -> RejoinDecision {
    let top = normalize(status);
    if top.is_empty() {
        return RejoinDecision::NoTopLevelStatus;
    }

    match vocabulary.category(&top) {
        StatusCategory::Active => RejoinDecision::TopLevelActive,
        StatusCategory::Terminal | StatusCategory::Inactive => {
            RejoinDecision::TopLevelRetiredOrInactive
        }
        _ if top == SUSPENDED && block_category == StatusCategory::Rejoinable => {
            RejoinDecision::SuspendedWithRejoinableBlock
        }
        _ => RejoinDecision::NotRejoinable,
    }
}
