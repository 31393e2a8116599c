//! Error types for the employee store.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A field of an employee record, as named in validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    FirstName,
    LastName,
    Department,
    PhoneNumber,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::FirstName => write!(f, "first name"),
            Field::LastName => write!(f, "last name"),
            Field::Department => write!(f, "department"),
            Field::PhoneNumber => write!(f, "phone number"),
        }
    }
}

/// One rejected field and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub reason: String,
}

impl FieldError {
    pub fn new(field: Field, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }

    /// The "required, got blank" failure.
    pub fn required(field: Field) -> Self {
        Self::new(field, "must not be empty")
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.reason)
    }
}

/// Errors raised by the model, the data access layer and configuration.
#[derive(Error, Debug)]
pub enum EmployeeError {
    #[error("validation failed: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),

    #[error("phone number {0} is already in use by another employee")]
    DuplicatePhoneNumber(String),

    #[error("employee with id {0} not found")]
    NotFound(i64),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("config error: {0}")]
    Config(String),
}

impl From<rusqlite::Error> for EmployeeError {
    fn from(e: rusqlite::Error) -> Self {
        EmployeeError::StorageUnavailable(e.to_string())
    }
}

impl From<std::io::Error> for EmployeeError {
    fn from(e: std::io::Error) -> Self {
        EmployeeError::StorageUnavailable(e.to_string())
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, EmployeeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_every_field() {
        let err = EmployeeError::Validation(vec![
            FieldError::required(Field::FirstName),
            FieldError::required(Field::PhoneNumber),
        ]);
        assert_eq!(
            err.to_string(),
            "validation failed: first name must not be empty; phone number must not be empty"
        );
    }

    #[test]
    fn test_sqlite_error_maps_to_storage_unavailable() {
        let err: EmployeeError = rusqlite::Error::InvalidQuery.into();
        assert!(matches!(err, EmployeeError::StorageUnavailable(_)));
    }
}
