//! Controller: validates input, calls storage and shapes outcomes.
//!
//! The controller owns the [`EmployeeDal`] and never issues SQL itself.

pub mod command;
pub mod outcome;

pub use command::{Command, Response};
pub use outcome::Outcome;

use std::path::Path;

use tracing::{debug, warn};

use crate::error::Result;
use crate::model::{Employee, EmployeeInput, SearchCriteria, Statistics, UpdateInput};
use crate::storage::EmployeeDal;

pub struct EmployeeController {
    dal: EmployeeDal,
}

impl EmployeeController {
    pub fn new(dal: EmployeeDal) -> Self {
        Self { dal }
    }

    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(EmployeeDal::open(path)?))
    }

    /// Validate and store a new employee, returning the stored record.
    pub fn add_employee(&self, input: &EmployeeInput) -> Outcome<Employee> {
        observe("add_employee", self.try_add(input).into())
    }

    pub fn list_employees(&self) -> Outcome<Vec<Employee>> {
        observe("list_employees", self.dal.find_all().into())
    }

    pub fn get_employee(&self, id: i64) -> Outcome<Employee> {
        observe("get_employee", self.dal.find_by_id(id).into())
    }

    pub fn search_employees(&self, criteria: SearchCriteria) -> Outcome<Vec<Employee>> {
        let criteria = criteria.normalized();
        observe("search_employees", self.dal.search(&criteria).into())
    }

    /// Partial update. The merged record is validated before anything is written.
    pub fn update_employee(&self, id: i64, changes: &UpdateInput) -> Outcome<Employee> {
        observe("update_employee", self.try_update(id, changes).into())
    }

    /// Irreversible. Returns the record as it was before removal.
    pub fn delete_employee(&self, id: i64) -> Outcome<Employee> {
        observe("delete_employee", self.try_delete(id).into())
    }

    pub fn get_statistics(&self) -> Outcome<Statistics> {
        observe("get_statistics", self.dal.statistics().into())
    }

    pub fn get_departments(&self) -> Outcome<Vec<String>> {
        observe("get_departments", self.dal.list_departments().into())
    }

    fn try_add(&self, input: &EmployeeInput) -> Result<Employee> {
        let new = input.validate()?;
        let id = self.dal.insert(&new)?;
        Ok(new.with_id(id))
    }

    fn try_update(&self, id: i64, changes: &UpdateInput) -> Result<Employee> {
        let existing = self.dal.find_by_id(id)?;
        let changes = changes.validate()?;
        let merged = existing.merged_with(&changes)?;
        if existing.same_fields_as(&merged) {
            debug!(id, "update changes nothing");
            return Ok(existing);
        }
        self.dal.update(id, &changes)
    }

    fn try_delete(&self, id: i64) -> Result<Employee> {
        let existing = self.dal.find_by_id(id)?;
        self.dal.delete(id)?;
        Ok(existing)
    }
}

fn observe<T>(operation: &str, outcome: Outcome<T>) -> Outcome<T> {
    match &outcome {
        Outcome::Success(_) => debug!(operation, "ok"),
        Outcome::ValidationFailed(errors) => debug!(operation, errors = errors.len(), "validation failed"),
        Outcome::Conflict(reason) => debug!(operation, reason = %reason, "conflict"),
        Outcome::NotFound(id) => debug!(operation, id, "not found"),
        Outcome::StorageError(message) => warn!(operation, error = %message, "storage error"),
    }
    outcome
}
