//! Ingestion result and diagnostic models.

use serde::{Deserialize, Serialize};

use crate::errors::{StorageError, ValidationError};
use crate::patients::PatientStore;
use crate::visits::VitalField;

/// Category of a rejected line or source failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticKind {
    FieldCount,
    InvalidType,
    OutOfRange,
    Storage,
}

/// One problem found while loading, in a form the shell can show or log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadDiagnostic {
    /// 1-based line number, when the problem belongs to a line
    pub line_number: Option<u64>,
    /// Offending line text
    pub line: Option<String>,
    pub kind: DiagnosticKind,
    /// Failing field for range violations
    pub field: Option<VitalField>,
    /// Human-readable message
    pub message: String,
}

impl LoadDiagnostic {
    pub(crate) fn rejected_line(line_number: Option<u64>, err: &ValidationError) -> Self {
        let (kind, field, line) = match err {
            ValidationError::FieldCount { line, .. } => (DiagnosticKind::FieldCount, None, line),
            ValidationError::InvalidType { line } => (DiagnosticKind::InvalidType, None, line),
            ValidationError::OutOfRange { field, line, .. } => {
                (DiagnosticKind::OutOfRange, Some(*field), line)
            }
            ValidationError::InvalidDate(date) => (DiagnosticKind::InvalidType, None, date),
        };
        Self {
            line_number,
            line: Some(line.clone()),
            kind,
            field,
            message: err.to_string(),
        }
    }

    pub(crate) fn storage(err: &StorageError) -> Self {
        Self {
            line_number: None,
            line: None,
            kind: DiagnosticKind::Storage,
            field: None,
            message: err.to_string(),
        }
    }
}

/// Store built from a source plus everything that was skipped on the way.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadReport {
    pub store: PatientStore,
    pub diagnostics: Vec<LoadDiagnostic>,
}

impl LoadReport {
    /// Number of lines excluded from the store.
    pub fn rejected_lines(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.kind != DiagnosticKind::Storage)
            .count()
    }

    /// True when the source could not be read to the end.
    pub fn has_storage_failure(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::Storage)
    }
}
