//! Search filters and partial-update payloads.

use serde::{Deserialize, Serialize};

use crate::error::{EmployeeError, Field, FieldError, Result};

/// How the department filter compares against stored departments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepartmentMatch {
    /// Case-insensitive substring.
    #[default]
    Substring,
    /// Case-insensitive equality.
    Exact,
}

/// Filters for employee search. `None` means "no filter on this field".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Matched against first name, last name and "first last".
    pub name: Option<String>,
    pub department: Option<String>,
    #[serde(default)]
    pub department_match: DepartmentMatch,
}

impl SearchCriteria {
    /// Build criteria from raw input. Blank strings become `None`.
    pub fn new(name: Option<&str>, department: Option<&str>) -> Self {
        Self {
            name: non_blank(name),
            department: non_blank(department),
            department_match: DepartmentMatch::Substring,
        }
    }

    pub fn by_name(name: &str) -> Self {
        Self::new(Some(name), None)
    }

    pub fn by_department(department: &str) -> Self {
        Self::new(None, Some(department))
    }

    pub fn exact_department(mut self) -> Self {
        self.department_match = DepartmentMatch::Exact;
        self
    }

    /// Re-apply trimming on criteria that were deserialized or built by hand.
    pub fn normalized(self) -> Self {
        Self {
            name: non_blank(self.name.as_deref()),
            department: non_blank(self.department.as_deref()),
            department_match: self.department_match,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.department.is_none()
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Raw partial update: `None` leaves the field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UpdateInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub department: Option<String>,
    pub phone_number: Option<String>,
}

impl UpdateInput {
    /// Trim present fields. A present field that is blank after trimming is
    /// rejected; clearing a field is not supported.
    pub fn validate(&self) -> Result<UpdateData> {
        let mut errors = Vec::new();
        let data = UpdateData {
            first_name: present(&self.first_name, Field::FirstName, &mut errors),
            last_name: present(&self.last_name, Field::LastName, &mut errors),
            department: present(&self.department, Field::Department, &mut errors),
            phone_number: present(&self.phone_number, Field::PhoneNumber, &mut errors),
        };

        if errors.is_empty() {
            Ok(data)
        } else {
            Err(EmployeeError::Validation(errors))
        }
    }
}

fn present(value: &Option<String>, field: Field, errors: &mut Vec<FieldError>) -> Option<String> {
    let trimmed = value.as_deref()?.trim();
    if trimmed.is_empty() {
        errors.push(FieldError::new(field, "must not be empty when provided"));
        return None;
    }
    Some(trimmed.to_string())
}

/// A validated partial update over the mutable employee fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateData {
    first_name: Option<String>,
    last_name: Option<String>,
    department: Option<String>,
    phone_number: Option<String>,
}

impl UpdateData {
    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.department.is_none()
            && self.phone_number.is_none()
    }

    /// `(column, value)` pairs for each field being changed, in column order.
    pub fn columns(&self) -> Vec<(&'static str, &str)> {
        [
            ("fname", self.first_name()),
            ("lname", self.last_name()),
            ("department", self.department()),
            ("phNumber", self.phone_number()),
        ]
        .into_iter()
        .filter_map(|(column, value)| value.map(|v| (column, v)))
        .collect()
    }
}
