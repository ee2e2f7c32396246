//! Core error types for the vitals record manager.
//!
//! Every failure a caller can trigger with user-shaped input maps to one of
//! these variants. None of them is process-fatal.

use thiserror::Error;

use crate::patients::PatientId;
use crate::visits::VitalField;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for record operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Patient with ID {0} not found")]
    PatientNotFound(PatientId),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Storage unavailable: {0}")]
    Storage(#[from] StorageError),
}

impl Error {
    /// Creates an InvalidArgument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }
}

/// Record-local validation failures.
///
/// Messages name the offending line so they can be shown as-is.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid number of fields ({found}) in line: {line}")]
    FieldCount { found: usize, line: String },

    #[error("Invalid data type in line: {line}")]
    InvalidType { line: String },

    #[error("Invalid {field} value ({value}) in line: {line}")]
    OutOfRange {
        field: VitalField,
        value: String,
        line: String,
    },

    #[error("Invalid date '{0}', expected a calendar date in the format YYYY-MM-DD")]
    InvalidDate(String),
}

/// Failures reading from or writing to persistent storage.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("The file '{0}' could not be found")]
    SourceNotFound(String),

    #[error("I/O failure on '{path}': {message}")]
    Io { path: String, message: String },
}

impl StorageError {
    /// Creates an Io error for the given path.
    pub fn io(path: impl Into<String>, err: impl std::fmt::Display) -> Self {
        StorageError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
