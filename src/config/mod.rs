//! Vocabulary configuration for the personnel engine.
//!
//! The status, leave-type and pay-grade vocabularies are data, not code: a
//! status is added by editing `statuses.yaml`. The engine uses the built-in
//! copy unless a caller loads and passes its own.
//!
//! # Example
//!
//! ```
//! use personnel_engine::config::Vocabulary;
//!
//! assert_eq!(Vocabulary::builtin().canonical_status("osd"), Some("OSD"));
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{LeaveTypesConfig, StatusCategory, StatusEntry, StatusesConfig, Vocabulary};
