//! The employee record and its validation rules.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::criteria::UpdateData;
use crate::error::{EmployeeError, Field, FieldError, Result};

/// A stored employee. Field names serialize as the storage column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    #[serde(rename = "fname")]
    pub first_name: String,
    #[serde(rename = "lname")]
    pub last_name: String,
    pub department: String,
    #[serde(rename = "phNumber")]
    pub phone_number: String,
}

impl Employee {
    /// "First Last", trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Apply a partial update on top of this record and validate the merged result.
    pub fn merged_with(&self, changes: &UpdateData) -> Result<NewEmployee> {
        EmployeeInput {
            first_name: pick(changes.first_name(), &self.first_name),
            last_name: pick(changes.last_name(), &self.last_name),
            department: pick(changes.department(), &self.department),
            phone_number: pick(changes.phone_number(), &self.phone_number),
        }
        .validate()
    }

    /// True when every field except the id equals `new`.
    pub fn same_fields_as(&self, new: &NewEmployee) -> bool {
        self.first_name == new.first_name
            && self.last_name == new.last_name
            && self.department == new.department
            && self.phone_number == new.phone_number
    }
}

fn pick(change: Option<&str>, current: &str) -> String {
    change.unwrap_or(current).to_string()
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} ({}, {})",
            self.id,
            self.full_name(),
            self.department,
            self.phone_number
        )
    }
}

/// Raw, unvalidated employee fields as typed by a user or sent by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EmployeeInput {
    pub first_name: String,
    pub last_name: String,
    pub department: String,
    pub phone_number: String,
}

impl EmployeeInput {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        department: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            department: department.into(),
            phone_number: phone_number.into(),
        }
    }

    /// Trim every field and reject blanks, reporting all offending fields at once.
    pub fn validate(&self) -> Result<NewEmployee> {
        let mut errors = Vec::new();
        let first_name = required(&self.first_name, Field::FirstName, &mut errors);
        let last_name = required(&self.last_name, Field::LastName, &mut errors);
        let department = required(&self.department, Field::Department, &mut errors);
        let phone_number = required(&self.phone_number, Field::PhoneNumber, &mut errors);

        if !errors.is_empty() {
            return Err(EmployeeError::Validation(errors));
        }

        Ok(NewEmployee {
            first_name,
            last_name,
            department,
            phone_number,
        })
    }
}

fn required(value: &str, field: Field, errors: &mut Vec<FieldError>) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(FieldError::required(field));
    }
    trimmed.to_string()
}

/// A validated employee that has not been stored yet.
///
/// Only obtainable through [`EmployeeInput::validate`] or
/// [`Employee::merged_with`], so every instance holds trimmed, non-empty fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewEmployee {
    first_name: String,
    last_name: String,
    department: String,
    phone_number: String,
}

impl NewEmployee {
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn with_id(self, id: i64) -> Employee {
        Employee {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            department: self.department,
            phone_number: self.phone_number,
        }
    }
}
