//! Error types for the personnel engine.
//!
//! The resolver, filter and rejoin classifier never fail: malformed records are
//! excluded from matches instead. Errors only arise while loading vocabulary
//! configuration or when a caller asks for a filter specification to be
//! validated up front.

use thiserror::Error;

/// The main error type for the personnel engine.
///
/// # Example
///
/// ```
/// use personnel_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/statuses.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/statuses.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The vocabulary parsed but is not usable (duplicates, empty lists).
    #[error("Invalid vocabulary: {message}")]
    InvalidVocabulary {
        /// A description of what made the vocabulary invalid.
        message: String,
    },

    /// A filter requested a status that is not in the vocabulary.
    #[error("Unknown status: {status}")]
    UnknownStatus {
        /// The status as supplied by the caller.
        status: String,
    },

    /// A filter requested a leave type that is not in the vocabulary.
    #[error("Unknown leave type: {leave_type}")]
    UnknownLeaveType {
        /// The leave type as supplied by the caller.
        leave_type: String,
    },

    /// A filter date bound could not be parsed.
    #[error("Invalid date for filter field '{field}': {value}")]
    InvalidFilterDate {
        /// The filter field carrying the bad value.
        field: String,
        /// The value that failed to parse.
        value: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/statuses.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/statuses.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_vocabulary_displays_message() {
        let error = EngineError::InvalidVocabulary {
            message: "duplicate status 'osd'".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid vocabulary: duplicate status 'osd'"
        );
    }

    #[test]
    fn test_unknown_status_displays_status() {
        let error = EngineError::UnknownStatus {
            status: "Promoted".to_string(),
        };
        assert_eq!(error.to_string(), "Unknown status: Promoted");
    }

    #[test]
    fn test_unknown_leave_type_displays_type() {
        let error = EngineError::UnknownLeaveType {
            leave_type: "Sabbatical".to_string(),
        };
        assert_eq!(error.to_string(), "Unknown leave type: Sabbatical");
    }

    #[test]
    fn test_invalid_filter_date_displays_field_and_value() {
        let error = EngineError::InvalidFilterDate {
            field: "dobFrom".to_string(),
            value: "31/02/1990".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid date for filter field 'dobFrom': 31/02/1990"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_config_not_found() -> EngineResult<()> {
            Err(EngineError::ConfigNotFound {
                path: "/test".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_config_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
