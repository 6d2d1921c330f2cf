//! Error types for gradebook.
//!
//! This module defines all error types used throughout the gradebook crate.
//! Gradebook errors are recoverable: the interaction layer reports them and
//! keeps running.

use thiserror::Error;

/// The main error type for gradebook operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Lookup Errors ===
    /// No student with the given name exists.
    #[error("student '{name}' not found in the system")]
    StudentNotFound {
        /// The name that was looked up.
        name: String,
    },

    /// The subject is not part of the curriculum.
    #[error("subject '{subject}' not found in the curriculum")]
    SubjectNotFound {
        /// The subject that was looked up.
        subject: String,
    },

    /// A grade index does not exist for the subject.
    #[error("no grade #{index} recorded for {subject}")]
    GradeIndexOutOfRange {
        /// Subject the index was applied to.
        subject: String,
        /// The zero-based index that was requested.
        index: usize,
    },

    // === Validation Errors ===
    /// A grade was out of range or could not be read as a number.
    #[error("{reason}: {grade}")]
    InvalidGrade {
        /// The offending value, as entered.
        grade: String,
        /// Why the grade was rejected.
        reason: String,
    },

    /// A student with the same name already exists.
    #[error("student '{name}' already exists in the system")]
    DuplicateStudent {
        /// The duplicated name.
        name: String,
    },

    /// A student name was empty or blank.
    #[error("student name cannot be empty")]
    InvalidName,

    /// A grade range could not be parsed.
    #[error("invalid grade range '{input}': expected MIN-MAX within 0-100")]
    InvalidRange {
        /// The text that failed to parse.
        input: String,
    },

    /// The operation needs at least one student.
    #[error("cannot perform {operation} - no data available")]
    EmptyData {
        /// Description of the attempted operation.
        operation: String,
    },

    /// Generic invalid console input.
    #[error("{0}")]
    InvalidInput(String),

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// Console I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for gradebook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a student-not-found error.
    #[must_use]
    pub fn student_not_found(name: impl Into<String>) -> Self {
        Self::StudentNotFound { name: name.into() }
    }

    /// Create a subject-not-found error.
    #[must_use]
    pub fn subject_not_found(subject: impl Into<String>) -> Self {
        Self::SubjectNotFound {
            subject: subject.into(),
        }
    }

    /// Create an invalid grade error.
    #[must_use]
    pub fn invalid_grade(grade: impl ToString, reason: impl Into<String>) -> Self {
        Self::InvalidGrade {
            grade: grade.to_string(),
            reason: reason.into(),
        }
    }

    /// Create an empty-data error for the named operation.
    #[must_use]
    pub fn empty_data(operation: impl Into<String>) -> Self {
        Self::EmptyData {
            operation: operation.into(),
        }
    }

    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Check if this error is a failed student lookup.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::StudentNotFound { .. })
    }

    /// Check if this error is a rejected grade.
    #[must_use]
    pub fn is_invalid_grade(&self) -> bool {
        matches!(self, Self::InvalidGrade { .. })
    }

    /// Check if this error was caused by user input rather than the environment.
    ///
    /// User errors are reported and the menu continues; anything else ends
    /// the interactive session.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        !matches!(
            self,
            Self::Io(_) | Self::Json(_) | Self::ConfigLoad(_) | Self::ConfigValidation { .. }
        )
    }

    /// A short label for the error kind, used as the prefix of console messages.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::StudentNotFound { .. } => "Student not found",
            Self::SubjectNotFound { .. } => "Subject not found",
            Self::GradeIndexOutOfRange { .. } => "Grade not found",
            Self::InvalidGrade { .. } => "Invalid grade",
            Self::DuplicateStudent { .. } => "Duplicate student",
            Self::InvalidName | Self::InvalidRange { .. } | Self::InvalidInput(_) => {
                "Invalid input"
            }
            Self::EmptyData { .. } => "No data available",
            Self::ConfigLoad(_) | Self::ConfigValidation { .. } => "Configuration error",
            Self::Io(_) | Self::Json(_) => "System error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_not_found_display() {
        let err = Error::student_not_found("Ann");
        assert_eq!(err.to_string(), "student 'Ann' not found in the system");
        assert!(err.is_not_found());
        assert!(!err.is_invalid_grade());
    }

    #[test]
    fn test_invalid_grade_display() {
        let err = Error::invalid_grade(101, "grade must be between 0 and 100");
        assert_eq!(err.to_string(), "grade must be between 0 and 100: 101");
        assert!(err.is_invalid_grade());
    }

    #[test]
    fn test_invalid_grade_keeps_raw_text() {
        let err = Error::invalid_grade("abc", "grade must be a number");
        assert!(err.to_string().ends_with("abc"));
    }

    #[test]
    fn test_subject_not_found_display() {
        let err = Error::subject_not_found("History");
        assert!(err.to_string().contains("History"));
        assert!(err.to_string().contains("curriculum"));
    }

    #[test]
    fn test_duplicate_student_display() {
        let err = Error::DuplicateStudent {
            name: "Bo".to_string(),
        };
        assert_eq!(err.to_string(), "student 'Bo' already exists in the system");
    }

    #[test]
    fn test_empty_data_display() {
        let err = Error::empty_data("student search");
        assert_eq!(
            err.to_string(),
            "cannot perform student search - no data available"
        );
    }

    #[test]
    fn test_grade_index_display() {
        let err = Error::GradeIndexOutOfRange {
            subject: "Science".to_string(),
            index: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("Science"));
        assert!(msg.contains('3'));
    }

    #[test]
    fn test_invalid_range_display() {
        let err = Error::InvalidRange {
            input: "90-80".to_string(),
        };
        assert!(err.to_string().contains("90-80"));
    }

    #[test]
    fn test_invalid_input_display_is_bare_message() {
        let err = Error::invalid_input("search term cannot be empty");
        assert_eq!(err.to_string(), "search term cannot be empty");
        assert_eq!(
            format!("{}: {err}", err.label()),
            "Invalid input: search term cannot be empty"
        );
    }

    #[test]
    fn test_user_errors() {
        assert!(Error::InvalidName.is_user_error());
        assert!(Error::student_not_found("x").is_user_error());
        assert!(Error::empty_data("x").is_user_error());
        assert!(Error::invalid_input("x").is_user_error());
    }

    #[test]
    fn test_environment_errors_are_not_user_errors() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: Error = io_err.into();
        assert!(!err.is_user_error());

        let err = Error::ConfigValidation {
            message: "bad".to_string(),
        };
        assert!(!err.is_user_error());
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(Error::student_not_found("x").label(), "Student not found");
        assert_eq!(Error::invalid_grade(-1, "r").label(), "Invalid grade");
        assert_eq!(Error::InvalidName.label(), "Invalid input");
        assert_eq!(Error::empty_data("x").label(), "No data available");
    }
}
