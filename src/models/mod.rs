//! Core data models for the personnel engine.
//!
//! This module contains the employee records the engine reads and the filter
//! specification it evaluates. The engine never mutates any of them.

mod employee;
mod employment_block;
mod filter_spec;

pub use employee::Employee;
pub use employment_block::{DisciplinaryAction, EmploymentBlock, Leave};
pub use filter_spec::{Criterion, FilterSpec, OneOrMany};

pub(crate) use filter_spec::{has_values, is_set};

use serde::{Deserialize, Deserializer};

/// An id as the data source sends it: a JSON string or a JSON integer.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        }
    }
}

/// Accepts an id given either as a JSON string or a JSON integer.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
}
