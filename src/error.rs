// 🚨 Error Types - Line-local and batch-fatal failures
//
// Two tiers:
// - LineError: one line is skipped, a diagnostic is recorded, the batch goes on
// - InputError: the input itself cannot be read, nothing is processed

use crate::entities::EmployeeKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// FIELD NAMES
// ============================================================================

/// Field of an employee line, used to name the culprit in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Matricule,
    LastName,
    FirstName,
    HireDate,
    Salary,
    AnnualRevenue,
    Performance,
    Grade,
    ManagerMatricule,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Matricule => "matricule",
            Field::LastName => "last name",
            Field::FirstName => "first name",
            Field::HireDate => "hire date",
            Field::Salary => "salary",
            Field::AnnualRevenue => "annual revenue",
            Field::Performance => "performance",
            Field::Grade => "grade",
            Field::ManagerMatricule => "manager matricule",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// LINE-LOCAL ERRORS
// ============================================================================

/// Everything that can go wrong while turning one line into a record.
///
/// Each variant keeps the offending value and the rule (or range) it broke,
/// so a diagnostic can be read without going back to the input file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("unrecognized employee kind: {}", describe_discriminator(.found))]
    UnrecognizedKind { found: Option<char> },

    #[error("{kind} line must contain {expected} fields but has {actual}")]
    FieldCountMismatch {
        kind: EmployeeKind,
        expected: usize,
        actual: usize,
    },

    #[error("{field} '{value}' does not match the pattern {rule}")]
    PatternMismatch {
        field: Field,
        value: String,
        rule: &'static str,
    },

    #[error("{field} '{value}' is not a valid date in format dd/MM/yyyy")]
    DateFormat { field: Field, value: String },

    #[error("{field} '{value}' is not a valid {expected}")]
    NumberFormat {
        field: Field,
        value: String,
        expected: &'static str,
    },

    #[error("{field} must be between {min} and {max}, got '{value}'")]
    Range {
        field: Field,
        value: String,
        min: i64,
        max: i64,
    },

    #[error("matricule '{matricule}' cannot belong to a {expected}")]
    KindMismatch {
        matricule: String,
        expected: EmployeeKind,
    },

    #[error("manager '{matricule}' was not found in the batch or in the store")]
    ManagerNotFound { matricule: String },

    #[error("store lookup for manager '{matricule}' failed: {message}")]
    StoreLookup { matricule: String, message: String },
}

impl LineError {
    /// Stable short code for reports (matches the variant)
    pub fn code(&self) -> &'static str {
        match self {
            LineError::UnrecognizedKind { .. } => "UnrecognizedKind",
            LineError::FieldCountMismatch { .. } => "FieldCountMismatch",
            LineError::PatternMismatch { .. } => "PatternMismatch",
            LineError::DateFormat { .. } => "DateFormatError",
            LineError::NumberFormat { .. } => "NumberFormatError",
            LineError::Range { .. } => "RangeError",
            LineError::KindMismatch { .. } => "KindMismatch",
            LineError::ManagerNotFound { .. } => "ManagerNotFound",
            LineError::StoreLookup { .. } => "StoreLookup",
        }
    }

    /// Field the error is about, when there is one
    pub fn field(&self) -> Option<Field> {
        match self {
            LineError::PatternMismatch { field, .. }
            | LineError::DateFormat { field, .. }
            | LineError::NumberFormat { field, .. }
            | LineError::Range { field, .. } => Some(*field),
            LineError::KindMismatch { .. } => Some(Field::Matricule),
            LineError::ManagerNotFound { .. } | LineError::StoreLookup { .. } => {
                Some(Field::ManagerMatricule)
            }
            LineError::UnrecognizedKind { .. } | LineError::FieldCountMismatch { .. } => None,
        }
    }
}

fn describe_discriminator(found: &Option<char>) -> String {
    match found {
        Some(c) => format!("'{}'", c),
        None => "empty line".to_string(),
    }
}

// ============================================================================
// BATCH-FATAL ERRORS
// ============================================================================

/// The input resource could not be opened or read
#[derive(Error, Debug)]
#[error("cannot read input {}: {source}", .path.display())]
pub struct InputError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_keep_value_and_rule() {
        let err = LineError::PatternMismatch {
            field: Field::LastName,
            value: "D0e".to_string(),
            rule: r"^[\p{L}\- ]*$",
        };
        let msg = err.to_string();
        assert!(msg.contains("last name"));
        assert!(msg.contains("D0e"));
        assert!(msg.contains(r"^[\p{L}\- ]*$"));
    }

    #[test]
    fn test_range_message() {
        let err = LineError::Range {
            field: Field::Grade,
            value: "7".to_string(),
            min: 1,
            max: 5,
        };
        assert_eq!(err.to_string(), "grade must be between 1 and 5, got '7'");
        assert_eq!(err.code(), "RangeError");
        assert_eq!(err.field(), Some(Field::Grade));
    }

    #[test]
    fn test_unrecognized_kind_message() {
        let err = LineError::UnrecognizedKind { found: Some('X') };
        assert_eq!(err.to_string(), "unrecognized employee kind: 'X'");

        let err = LineError::UnrecognizedKind { found: None };
        assert_eq!(err.to_string(), "unrecognized employee kind: empty line");
        assert_eq!(err.field(), None);
    }

    #[test]
    fn test_field_count_message() {
        let err = LineError::FieldCountMismatch {
            kind: EmployeeKind::Technician,
            expected: 7,
            actual: 5,
        };
        assert_eq!(
            err.to_string(),
            "technician line must contain 7 fields but has 5"
        );
    }
}
