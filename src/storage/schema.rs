//! The `employee` table layout.

use rusqlite::Connection;

pub const TABLE: &str = "employee";

/// Column order as created by [`create`]; other tools rely on it.
pub const COLUMNS: [&str; 5] = ["id", "fname", "lname", "department", "phNumber"];

pub const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS employee (
    id INTEGER PRIMARY KEY NOT NULL,
    fname TEXT,
    lname TEXT,
    department TEXT,
    phNumber TEXT
)";

pub fn create(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(CREATE_TABLE, [])?;
    Ok(())
}

/// Column names of the `employee` table, empty if the table is missing.
pub fn columns(conn: &Connection) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1) ORDER BY cid")?;
    let names = stmt
        .query_map([TABLE], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(names)
}

pub fn matches_expected(conn: &Connection) -> rusqlite::Result<bool> {
    Ok(columns(conn)? == COLUMNS)
}
