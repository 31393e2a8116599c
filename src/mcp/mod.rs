//! MCP (Model Context Protocol) server exposing raw SQLite tools.
//!
//! A separate trust domain from the employee application: the tools talk to
//! the database file directly and bypass every validation rule in
//! [`crate::model`] and [`crate::storage`].

pub mod server;
pub mod sqlite;
pub mod tools;
pub mod types;

pub use sqlite::{SqlToolError, SqliteTools};
