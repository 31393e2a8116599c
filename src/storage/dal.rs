//! Data access layer for the `employee` table.
//!
//! Every statement binds its values as parameters; the only dynamic SQL is
//! assembled from the fixed column fragments below.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::path::Path;

use rusqlite::functions::FunctionFlags;
use rusqlite::types::ToSql;
use rusqlite::{params, params_from_iter, Connection, OpenFlags, OptionalExtension, Row};
use tracing::{debug, info};

use super::schema;
use crate::error::{EmployeeError, Result};
use crate::model::{DepartmentMatch, Employee, NewEmployee, SearchCriteria, Statistics, UpdateData};

const SELECT_EMPLOYEE: &str = "SELECT id, fname, lname, department, phNumber FROM employee";

/// SQL function name for Unicode lowercasing. SQLite's own `lower()`,
/// `LIKE` and `NOCASE` fold ASCII only.
const LOWER_FN: &str = "unicode_lower";

/// Owns the storage connection for one session. Dropping the DAL closes it.
pub struct EmployeeDal {
    conn: Connection,
    /// Highest id handed out by this handle, so ids of deleted rows are not reissued.
    high_water: Cell<i64>,
}

impl EmployeeDal {
    /// Open an existing database file. A missing file is an error, not an
    /// invitation to create an empty database.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(EmployeeError::StorageUnavailable(format!(
                "database file not found: {}",
                path.display()
            )));
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        info!(path = %path.display(), "opened employee database");
        Self::from_connection(conn)
    }

    /// A private in-memory database with the schema already created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::create(&conn)?;
        Self::from_connection(conn)
    }

    /// Wrap a connection whose `employee` table already exists.
    pub fn from_connection(conn: Connection) -> Result<Self> {
        if !schema::matches_expected(&conn)? {
            return Err(EmployeeError::StorageUnavailable(format!(
                "table '{}' is missing or has unexpected columns",
                schema::TABLE
            )));
        }
        register_functions(&conn)?;
        Ok(Self {
            conn,
            high_water: Cell::new(0),
        })
    }

    // ─── Writes ─────────────────────────────────────────────────

    /// Insert a validated employee and return its new id.
    pub fn insert(&self, new: &NewEmployee) -> Result<i64> {
        let tx = self.conn.unchecked_transaction()?;

        if phone_owner(&tx, new.phone_number(), None)?.is_some() {
            return Err(EmployeeError::DuplicatePhoneNumber(
                new.phone_number().to_string(),
            ));
        }

        let max_id: i64 = tx.query_row("SELECT COALESCE(MAX(id), 0) FROM employee", [], |row| {
            row.get(0)
        })?;
        let id = max_id.max(self.high_water.get()) + 1;

        tx.execute(
            "INSERT INTO employee (id, fname, lname, department, phNumber) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                id,
                new.first_name(),
                new.last_name(),
                new.department(),
                new.phone_number()
            ],
        )?;
        tx.commit()?;

        self.high_water.set(id);
        debug!(id, "inserted employee");
        Ok(id)
    }

    /// Apply the present fields of `changes` and return the stored result.
    /// An empty change set returns the record untouched.
    pub fn update(&self, id: i64, changes: &UpdateData) -> Result<Employee> {
        let tx = self.conn.unchecked_transaction()?;

        let current = find_in(&tx, id)?.ok_or(EmployeeError::NotFound(id))?;
        if changes.is_empty() {
            return Ok(current);
        }

        if let Some(phone) = changes.phone_number() {
            if phone_owner(&tx, phone, Some(id))?.is_some() {
                return Err(EmployeeError::DuplicatePhoneNumber(phone.to_string()));
            }
        }

        let columns = changes.columns();
        let assignments: Vec<String> = columns
            .iter()
            .map(|(column, _)| format!("{} = ?", column))
            .collect();
        let sql = format!("UPDATE employee SET {} WHERE id = ?", assignments.join(", "));

        let mut values: Vec<&dyn ToSql> = columns
            .iter()
            .map(|(_, value)| value as &dyn ToSql)
            .collect();
        values.push(&id);

        tx.execute(&sql, values.as_slice())?;
        let updated = find_in(&tx, id)?.ok_or(EmployeeError::NotFound(id))?;
        tx.commit()?;

        debug!(id, fields = columns.len(), "updated employee");
        Ok(updated)
    }

    /// Remove a row. Deleting a missing id is `NotFound` every time.
    pub fn delete(&self, id: i64) -> Result<()> {
        let removed = self
            .conn
            .execute("DELETE FROM employee WHERE id = ?1", [id])?;
        if removed == 0 {
            return Err(EmployeeError::NotFound(id));
        }
        debug!(id, "deleted employee");
        Ok(())
    }

    // ─── Reads ──────────────────────────────────────────────────

    pub fn find_all(&self) -> Result<Vec<Employee>> {
        self.search(&SearchCriteria::default())
    }

    pub fn find_by_id(&self, id: i64) -> Result<Employee> {
        find_in(&self.conn, id)?.ok_or(EmployeeError::NotFound(id))
    }

    /// Employees matching every criteria field that is set, ordered by id.
    pub fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Employee>> {
        let (sql, values) = build_search(criteria);
        debug!(sql = %sql, "searching employees");

        let mut stmt = self.conn.prepare(&sql)?;
        let employees = stmt
            .query_map(params_from_iter(values.iter()), row_to_employee)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(employees)
    }

    /// Distinct departments, alphabetical.
    pub fn list_departments(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT department FROM employee WHERE department IS NOT NULL ORDER BY department",
        )?;
        let departments = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(departments)
    }

    pub fn count(&self) -> Result<usize> {
        let total: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM employee", [], |row| row.get(0))?;
        Ok(total as usize)
    }

    /// Head count per department, computed from the current rows.
    pub fn statistics(&self) -> Result<Statistics> {
        let mut stmt = self.conn.prepare(
            "SELECT department, COUNT(*) FROM employee \
             WHERE department IS NOT NULL GROUP BY department ORDER BY department",
        )?;
        let by_department = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as usize))
            })?
            .collect::<rusqlite::Result<BTreeMap<_, _>>>()?;

        Ok(Statistics {
            total: self.count()?,
            departments: by_department.len(),
            by_department,
        })
    }
}

fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        LOWER_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| Ok(ctx.get::<Option<String>>(0)?.map(|v| v.to_lowercase())),
    )
}

fn find_in(conn: &Connection, id: i64) -> Result<Option<Employee>> {
    let sql = format!("{} WHERE id = ?1", SELECT_EMPLOYEE);
    let employee = conn
        .query_row(&sql, [id], row_to_employee)
        .optional()?;
    Ok(employee)
}

/// Id of the row holding `phone`, ignoring `except`.
fn phone_owner(conn: &Connection, phone: &str, except: Option<i64>) -> Result<Option<i64>> {
    let owner = match except {
        Some(id) => conn
            .query_row(
                "SELECT id FROM employee WHERE phNumber = ?1 AND id <> ?2 LIMIT 1",
                params![phone, id],
                |row| row.get(0),
            )
            .optional()?,
        None => conn
            .query_row(
                "SELECT id FROM employee WHERE phNumber = ?1 LIMIT 1",
                [phone],
                |row| row.get(0),
            )
            .optional()?,
    };
    Ok(owner)
}

/// Rows written by other tools may hold NULLs; they read back as empty text.
fn row_to_employee(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get(0)?,
        first_name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        last_name: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        department: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        phone_number: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
    })
}

/// SQL text plus bound values for a search. Values never enter the SQL text.
/// Both sides of every comparison are folded with [`LOWER_FN`].
fn build_search(criteria: &SearchCriteria) -> (String, Vec<String>) {
    let mut clauses: Vec<String> = Vec::new();
    let mut values: Vec<String> = Vec::new();

    if let Some(name) = &criteria.name {
        clauses.push(format!(
            "({f}(fname) LIKE ? ESCAPE '\\' OR {f}(lname) LIKE ? ESCAPE '\\' \
             OR {f}(fname || ' ' || lname) LIKE ? ESCAPE '\\')",
            f = LOWER_FN
        ));
        let pattern = like_pattern(&name.to_lowercase());
        values.extend(std::iter::repeat(pattern).take(3));
    }

    if let Some(department) = &criteria.department {
        match criteria.department_match {
            DepartmentMatch::Substring => {
                clauses.push(format!("{}(department) LIKE ? ESCAPE '\\'", LOWER_FN));
                values.push(like_pattern(&department.to_lowercase()));
            }
            DepartmentMatch::Exact => {
                clauses.push(format!("{}(department) = ?", LOWER_FN));
                values.push(department.to_lowercase());
            }
        }
    }

    let sql = if clauses.is_empty() {
        format!("{} ORDER BY id", SELECT_EMPLOYEE)
    } else {
        format!("{} WHERE {} ORDER BY id", SELECT_EMPLOYEE, clauses.join(" AND "))
    };
    (sql, values)
}

/// `%term%` with LIKE wildcards in `term` matched literally.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
