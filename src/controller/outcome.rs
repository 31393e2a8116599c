//! User-facing result of a controller operation.

use serde::Serialize;

use crate::error::{EmployeeError, FieldError, Result};

/// What a controller operation produced. Every failure keeps enough detail
/// for the caller to correct its input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Outcome<T> {
    Success(T),
    ValidationFailed(Vec<FieldError>),
    /// The phone number already belongs to another employee.
    Conflict(String),
    NotFound(i64),
    StorageError(String),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn success(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<EmployeeError> for Outcome<T> {
    fn from(err: EmployeeError) -> Self {
        match err {
            EmployeeError::Validation(errors) => Outcome::ValidationFailed(errors),
            e @ EmployeeError::DuplicatePhoneNumber(_) => Outcome::Conflict(e.to_string()),
            EmployeeError::NotFound(id) => Outcome::NotFound(id),
            EmployeeError::StorageUnavailable(message) | EmployeeError::Config(message) => {
                Outcome::StorageError(message)
            }
        }
    }
}

impl<T> From<Result<T>> for Outcome<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Field;

    #[test]
    fn test_error_mapping() {
        let outcome: Outcome<()> = EmployeeError::NotFound(3).into();
        assert_eq!(outcome, Outcome::NotFound(3));

        let outcome: Outcome<()> = EmployeeError::DuplicatePhoneNumber("555".into()).into();
        assert!(matches!(outcome, Outcome::Conflict(ref r) if r.contains("555")));

        let outcome: Outcome<()> = EmployeeError::StorageUnavailable("disk".into()).into();
        assert_eq!(outcome, Outcome::StorageError("disk".to_string()));
    }

    #[test]
    fn test_serializes_with_status_tag() {
        let outcome: Outcome<u32> =
            Outcome::ValidationFailed(vec![FieldError::required(Field::LastName)]);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "validation_failed");
        assert_eq!(json["data"][0]["field"], "last_name");

        let json = serde_json::to_value(Outcome::Success(5u32)).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"], 5);
    }
}
