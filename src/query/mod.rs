//! Query and classification logic for the personnel engine.
//!
//! This module contains current employment block resolution, multi-criteria
//! population filtering with leave and disciplinary history tests, and rejoin
//! eligibility classification. Everything here is pure: no I/O, no shared
//! state, inputs are never mutated.

mod current_block;
pub(crate) mod dates;
mod filter;
mod leave_window;
mod rejoin;
pub(crate) mod text;

pub use current_block::resolve_current_block;
pub use dates::parse_date;
pub use filter::{explain_rejection, filter_employees, filter_employees_at};
pub use rejoin::{RejoinDecision, can_rejoin, can_rejoin_with, classify_rejoin};
pub use text::{digits, normalize};
