//! One-time database setup: schema plus ten sample employees.

use std::fs;
use std::path::Path;

use rusqlite::Connection;
use serde::Serialize;
use tracing::info;

use super::dal::EmployeeDal;
use super::schema;
use crate::error::{EmployeeError, Result};
use crate::model::EmployeeInput;

/// `(first, last, department, phone)` rows written by [`create_database`].
pub const SAMPLE_EMPLOYEES: [(&str, &str, &str, &str); 10] = [
    ("John", "Doe", "Engineering", "555-0101"),
    ("Jane", "Smith", "Marketing", "555-0102"),
    ("Mike", "Johnson", "Engineering", "555-0103"),
    ("Sarah", "Williams", "HR", "555-0104"),
    ("David", "Brown", "Finance", "555-0105"),
    ("Lisa", "Davis", "Marketing", "555-0106"),
    ("Tom", "Wilson", "Engineering", "555-0107"),
    ("Amy", "Garcia", "HR", "555-0108"),
    ("Chris", "Martinez", "Finance", "555-0109"),
    ("Emma", "Anderson", "Marketing", "555-0110"),
];

/// Create the database file, the `employee` table and the sample rows.
///
/// An existing file is only replaced when `overwrite` is set. Returns the
/// number of rows seeded.
pub fn create_database(path: &Path, overwrite: bool) -> Result<usize> {
    if path.exists() {
        if !overwrite {
            return Err(EmployeeError::StorageUnavailable(format!(
                "{} already exists (use --force to recreate it)",
                path.display()
            )));
        }
        fs::remove_file(path)?;
        info!(path = %path.display(), "removed existing database");
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let conn = Connection::open(path)?;
    schema::create(&conn)?;
    let dal = EmployeeDal::from_connection(conn)?;

    for (first, last, department, phone) in SAMPLE_EMPLOYEES {
        let new = EmployeeInput::new(first, last, department, phone).validate()?;
        dal.insert(&new)?;
    }

    info!(path = %path.display(), rows = SAMPLE_EMPLOYEES.len(), "database created");
    Ok(SAMPLE_EMPLOYEES.len())
}

/// Result of [`verify_database`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verification {
    pub columns: Vec<String>,
    pub layout_ok: bool,
    pub row_count: usize,
}

/// Inspect an existing file: column layout and row count.
pub fn verify_database(path: &Path) -> Result<Verification> {
    if !path.is_file() {
        return Err(EmployeeError::StorageUnavailable(format!(
            "database file not found: {}",
            path.display()
        )));
    }
    let conn = Connection::open(path)?;
    let columns = schema::columns(&conn)?;
    let layout_ok = columns == schema::COLUMNS;

    let row_count = if layout_ok {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM employee", [], |row| row.get(0))?;
        count as usize
    } else {
        0
    };

    Ok(Verification {
        columns,
        layout_ok,
        row_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_verify() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("employees.db");

        assert_eq!(create_database(&path, false).unwrap(), 10);

        let report = verify_database(&path).unwrap();
        assert!(report.layout_ok);
        assert_eq!(report.row_count, 10);
        assert_eq!(report.columns, schema::COLUMNS);

        let dal = EmployeeDal::open(&path).unwrap();
        assert_eq!(
            dal.list_departments().unwrap(),
            vec!["Engineering", "Finance", "HR", "Marketing"]
        );
    }

    #[test]
    fn test_refuses_to_overwrite_without_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("employees.db");
        create_database(&path, false).unwrap();

        assert!(create_database(&path, false).is_err());
        assert_eq!(create_database(&path, true).unwrap(), 10);
        assert_eq!(verify_database(&path).unwrap().row_count, 10);
    }

    #[test]
    fn test_verify_missing_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch("PRAGMA user_version = 1").unwrap();
        drop(conn);

        let report = verify_database(&path).unwrap();
        assert!(!report.layout_ok);
        assert_eq!(report.row_count, 0);
    }
}
