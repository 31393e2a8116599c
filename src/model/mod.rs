//! Record model: the employee entity plus search and update criteria.
//!
//! Everything here is pure: raw input goes in, a validated value or a list
//! of field errors comes out.

pub mod criteria;
pub mod employee;

pub use criteria::{DepartmentMatch, SearchCriteria, UpdateData, UpdateInput};
pub use employee::{Employee, EmployeeInput, NewEmployee};

use std::collections::BTreeMap;

use serde::Serialize;

/// Live head counts per department.
///
/// `total` counts every row. Rows without a department (only possible when
/// written outside the application, e.g. through the SQL tools) appear in
/// `total` but in no `by_department` bucket, so the buckets can sum to less.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total: usize,
    pub departments: usize,
    pub by_department: BTreeMap<String, usize>,
}
