//! Vocabulary loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the status and
//! leave-type vocabularies from YAML files, and the built-in vocabulary that
//! ships compiled into the crate.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use tracing::warn;

use crate::error::{EngineError, EngineResult};

use super::types::{LeaveTypesConfig, StatusesConfig, Vocabulary};

const BUILTIN_STATUSES: &str = include_str!("../../config/personnel/statuses.yaml");
const BUILTIN_LEAVE_TYPES: &str = include_str!("../../config/personnel/leave_types.yaml");

static BUILTIN: OnceLock<Vocabulary> = OnceLock::new();

/// Loads and provides access to the personnel vocabulary.
///
/// # Directory Structure
///
/// ```text
/// config/personnel/
/// ├── statuses.yaml     # Status names and their life-cycle categories
/// └── leave_types.yaml  # Leave types and the highest pay grade
/// ```
///
/// # Example
///
/// ```no_run
/// use personnel_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/personnel")?;
/// assert!(loader.vocabulary().is_terminal("Retired"));
/// # Ok::<(), personnel_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    vocabulary: Vocabulary,
}

impl ConfigLoader {
    /// Loads the vocabulary from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns an error if either file is missing, contains invalid YAML, or
    /// describes an unusable vocabulary (duplicate or blank names).
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let statuses = Self::load_yaml::<StatusesConfig>(&path.join("statuses.yaml"))?;
        let leave_types = Self::load_yaml::<LeaveTypesConfig>(&path.join("leave_types.yaml"))?;

        let vocabulary = Vocabulary::new(statuses, leave_types).inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "Rejected vocabulary");
        })?;

        Ok(Self { vocabulary })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::parse_yaml(&content, path_str)
    }

    fn parse_yaml<T: serde::de::DeserializeOwned>(content: &str, path: String) -> EngineResult<T> {
        serde_yaml::from_str(content).map_err(|e| {
            warn!(path = %path, error = %e, "Failed to parse vocabulary file");
            EngineError::ConfigParseError {
                path,
                message: e.to_string(),
            }
        })
    }

    /// Returns the loaded vocabulary.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Consumes the loader, returning the vocabulary.
    pub fn into_vocabulary(self) -> Vocabulary {
        self.vocabulary
    }
}

impl Vocabulary {
    /// Returns the vocabulary compiled into the crate.
    ///
    /// Parsed once on first use and shared for the life of the process.
    pub fn builtin() -> &'static Vocabulary {
        BUILTIN.get_or_init(|| {
            let statuses = ConfigLoader::parse_yaml::<StatusesConfig>(
                BUILTIN_STATUSES,
                "builtin statuses.yaml".to_string(),
            )
            .expect("Built-in statuses.yaml is valid");
            let leave_types = ConfigLoader::parse_yaml::<LeaveTypesConfig>(
                BUILTIN_LEAVE_TYPES,
                "builtin leave_types.yaml".to_string(),
            )
            .expect("Built-in leave_types.yaml is valid");
            Vocabulary::new(statuses, leave_types).expect("Built-in vocabulary is consistent")
        })
    }
}
