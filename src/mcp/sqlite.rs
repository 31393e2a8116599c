//! Raw SQL against the database file.
//!
//! This path is deliberately separate from the employee DAL: nothing here
//! validates records or enforces phone uniqueness. Each call opens its own
//! connection and drops it before returning.

use std::path::{Path, PathBuf};

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, Statement};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SqlToolError {
    #[error("Missing required parameter: {0}")]
    MissingArgument(&'static str),

    #[error("Malformed query: {0}")]
    MalformedQuery(String),

    #[error("Only read-only statements are allowed with sqlite_query. Use sqlite_execute for other operations.")]
    ReadOnlyViolation,

    /// Message from SQLite, unaltered.
    #[error("SQLite error: {0}")]
    Engine(String),
}

impl From<rusqlite::Error> for SqlToolError {
    fn from(e: rusqlite::Error) -> Self {
        SqlToolError::Engine(e.to_string())
    }
}

pub type SqlResult<T> = std::result::Result<T, SqlToolError>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
    pub row_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecuteResult {
    pub status: &'static str,
    pub affected_row_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Vec<Value>>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ColumnInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
    pub not_null: bool,
    pub primary_key: bool,
    pub default: Option<String>,
}

/// Handle to one database file. Holds only the path, never a connection.
#[derive(Debug, Clone)]
pub struct SqliteTools {
    db_path: PathBuf,
}

impl SqliteTools {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Run a read-only statement. The connection itself is opened read-only
    /// as well as the statement being checked.
    pub fn query(&self, sql: &str) -> SqlResult<QueryResult> {
        let conn = self.connect(OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        let mut stmt = prepare(&conn, sql)?;
        if !stmt.readonly() {
            return Err(SqlToolError::ReadOnlyViolation);
        }
        let (columns, rows) = collect_rows(&mut stmt)?;
        debug!(rows = rows.len(), "sqlite_query");
        Ok(QueryResult {
            row_count: rows.len(),
            columns,
            rows,
        })
    }

    /// Run any single statement, schema changes included.
    pub fn execute(&self, sql: &str) -> SqlResult<ExecuteResult> {
        let conn = self.connect(OpenFlags::SQLITE_OPEN_READ_WRITE)?;
        let mut stmt = prepare(&conn, sql)?;

        let result = if stmt.column_count() > 0 {
            let writes = !stmt.readonly();
            let (columns, rows) = collect_rows(&mut stmt)?;
            ExecuteResult {
                status: "success",
                // RETURNING yields one row per changed row.
                affected_row_count: if writes { rows.len() } else { 0 },
                columns: Some(columns),
                rows: Some(rows),
            }
        } else {
            ExecuteResult {
                status: "success",
                affected_row_count: stmt.execute([])?,
                columns: None,
                rows: None,
            }
        };
        debug!(affected = result.affected_row_count, "sqlite_execute");
        Ok(result)
    }

    /// User tables, alphabetical.
    pub fn tables(&self) -> SqlResult<Vec<String>> {
        let conn = self.connect(OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        list_tables(&conn)
    }

    pub fn schema(&self) -> SqlResult<Vec<TableSchema>> {
        let conn = self.connect(OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        let mut stmt = conn.prepare(
            "SELECT name, type, \"notnull\", dflt_value, pk FROM pragma_table_info(?1) ORDER BY cid",
        )?;

        let mut schema = Vec::new();
        for table in list_tables(&conn)? {
            let columns = stmt
                .query_map([&table], |row| {
                    Ok(ColumnInfo {
                        name: row.get(0)?,
                        data_type: row.get(1)?,
                        not_null: row.get::<_, i64>(2)? != 0,
                        default: row.get(3)?,
                        primary_key: row.get::<_, i64>(4)? != 0,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            schema.push(TableSchema {
                name: table,
                columns,
            });
        }
        Ok(schema)
    }

    fn connect(&self, mode: OpenFlags) -> SqlResult<Connection> {
        let flags = mode | OpenFlags::SQLITE_OPEN_NO_MUTEX | OpenFlags::SQLITE_OPEN_URI;
        Ok(Connection::open_with_flags(&self.db_path, flags)?)
    }
}

fn prepare<'c>(conn: &'c Connection, sql: &str) -> SqlResult<Statement<'c>> {
    let sql = sql.trim();
    if sql.is_empty() {
        return Err(SqlToolError::MalformedQuery("empty statement".to_string()));
    }
    conn.prepare(sql)
        .map_err(|e| SqlToolError::MalformedQuery(e.to_string()))
}

fn list_tables(conn: &Connection) -> SqlResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(names)
}

fn collect_rows(stmt: &mut Statement<'_>) -> SqlResult<(Vec<String>, Vec<Vec<Value>>)> {
    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let width = columns.len();

    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(width);
        for i in 0..width {
            values.push(to_json(row.get_ref(i)?));
        }
        out.push(values);
    }
    Ok((columns, out))
}

fn to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => Value::from(f),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::String(format!("<blob {} bytes>", bytes.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixture() -> (tempfile::TempDir, SqliteTools) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("employees.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE employee (id INTEGER PRIMARY KEY NOT NULL, fname TEXT, lname TEXT, department TEXT, phNumber TEXT);
             INSERT INTO employee (fname, lname, department, phNumber) VALUES ('John', 'Doe', 'Engineering', '555-0101');
             INSERT INTO employee (fname, lname, department, phNumber) VALUES ('Jane', 'Smith', 'Marketing', '555-0102');",
        )
        .unwrap();
        (dir, SqliteTools::new(path))
    }

    #[test]
    fn test_query_returns_table() {
        let (_dir, tools) = fixture();
        let result = tools
            .query("SELECT fname, id FROM employee ORDER BY id")
            .unwrap();
        assert_eq!(result.columns, vec!["fname", "id"]);
        assert_eq!(result.row_count, 2);
        assert_eq!(result.rows[1], vec![json!("Jane"), json!(2)]);
    }

    #[test]
    fn test_query_rejects_writes() {
        let (_dir, tools) = fixture();
        let err = tools.query("DELETE FROM employee").unwrap_err();
        assert!(matches!(err, SqlToolError::ReadOnlyViolation));
        assert_eq!(tools.query("SELECT * FROM employee").unwrap().row_count, 2);
    }

    #[test]
    fn test_query_malformed() {
        let (_dir, tools) = fixture();
        match tools.query("SELEC nonsense").unwrap_err() {
            SqlToolError::MalformedQuery(msg) => assert!(msg.contains("syntax error")),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(matches!(
            tools.query("   ").unwrap_err(),
            SqlToolError::MalformedQuery(_)
        ));
    }

    #[test]
    fn test_execute_reports_affected_rows() {
        let (_dir, tools) = fixture();
        let result = tools
            .execute("UPDATE employee SET department = 'Ops'")
            .unwrap();
        assert_eq!(result.status, "success");
        assert_eq!(result.affected_row_count, 2);
        assert!(result.rows.is_none());
    }

    #[test]
    fn test_execute_bypasses_phone_uniqueness() {
        let (_dir, tools) = fixture();
        tools
            .execute("INSERT INTO employee (fname, phNumber) VALUES ('Dup', '555-0101')")
            .unwrap();
        let result = tools
            .query("SELECT COUNT(*) AS n FROM employee WHERE phNumber = '555-0101'")
            .unwrap();
        assert_eq!(result.rows[0][0], json!(2));
    }

    #[test]
    fn test_execute_schema_change_and_select() {
        let (_dir, tools) = fixture();
        let created = tools
            .execute("CREATE TABLE audit (id INTEGER PRIMARY KEY, note TEXT)")
            .unwrap();
        assert_eq!(created.affected_row_count, 0);
        assert_eq!(tools.tables().unwrap(), vec!["audit", "employee"]);

        let selected = tools.execute("SELECT id FROM employee").unwrap();
        assert_eq!(selected.affected_row_count, 0);
        assert_eq!(selected.rows.map(|r| r.len()), Some(2));
    }

    #[test]
    fn test_execute_engine_error_is_verbatim() {
        let (_dir, tools) = fixture();
        tools.execute("CREATE TABLE t (x INTEGER NOT NULL)").unwrap();
        match tools.execute("INSERT INTO t (x) VALUES (NULL)").unwrap_err() {
            SqlToolError::Engine(msg) => assert!(msg.contains("NOT NULL constraint failed")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_schema_lists_columns() {
        let (_dir, tools) = fixture();
        let schema = tools.schema().unwrap();
        assert_eq!(schema.len(), 1);
        assert_eq!(schema[0].name, "employee");

        let names: Vec<&str> = schema[0].columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["id", "fname", "lname", "department", "phNumber"]);

        let id = &schema[0].columns[0];
        assert_eq!(id.data_type, "INTEGER");
        assert!(id.not_null);
        assert!(id.primary_key);
        assert!(!schema[0].columns[1].primary_key);
    }

    #[test]
    fn test_missing_database_is_engine_error() {
        let dir = tempfile::tempdir().unwrap();
        let tools = SqliteTools::new(dir.path().join("absent.db"));
        assert!(matches!(tools.tables(), Err(SqlToolError::Engine(_))));
        assert!(!dir.path().join("absent.db").exists());
    }
}
