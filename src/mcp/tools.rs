//! MCP tool catalogue and dispatch onto [`SqliteTools`].

use serde::Serialize;
use serde_json::{json, Value};

use super::sqlite::{SqlResult, SqlToolError, SqliteTools};
use super::types::{ToolDefinition, ToolOutput};

pub fn list_tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "sqlite_query",
            description: "Execute a read-only SQL statement (SELECT, read-only PRAGMA, ...) \
                on the SQLite database. Returns column names and rows.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "SQL SELECT query to execute"
                    }
                },
                "required": ["query"]
            }),
        },
        ToolDefinition {
            name: "sqlite_execute",
            description: "Execute any SQL command (INSERT, UPDATE, DELETE, CREATE, etc.) on \
                the SQLite database. Returns the number of affected rows. No validation is \
                applied to the data written.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "command": {
                        "type": "string",
                        "description": "SQL command to execute"
                    }
                },
                "required": ["command"]
            }),
        },
        ToolDefinition {
            name: "sqlite_schema",
            description: "Get the column layout of every table in the database.",
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
        },
        ToolDefinition {
            name: "sqlite_tables",
            description: "List all tables in the database.",
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
        },
    ]
}

/// Run the named tool. Failures come back as error outputs, never panics.
pub fn call_tool(tools: &SqliteTools, name: &str, arguments: &Value) -> ToolOutput {
    match name {
        "sqlite_query" => respond(string_arg(arguments, "query").and_then(|q| tools.query(q))),
        "sqlite_execute" => {
            respond(string_arg(arguments, "command").and_then(|c| tools.execute(c)))
        }
        "sqlite_schema" => respond(tools.schema().map(|tables| json!({ "tables": tables }))),
        "sqlite_tables" => respond(tools.tables().map(|tables| {
            json!({ "count": tables.len(), "tables": tables })
        })),
        _ => ToolOutput::error(format!("Unknown tool: {}", name)),
    }
}

fn string_arg<'a>(arguments: &'a Value, key: &'static str) -> SqlResult<&'a str> {
    arguments
        .get(key)
        .and_then(Value::as_str)
        .ok_or(SqlToolError::MissingArgument(key))
}

fn respond<T: Serialize>(result: SqlResult<T>) -> ToolOutput {
    match result {
        Ok(payload) => ToolOutput::json(&payload),
        Err(e) => {
            tracing::debug!(error = %e, "tool call failed");
            ToolOutput::error(e.to_string())
        }
    }
}
