//! MCP JSON-RPC 2.0 server over newline-delimited STDIO.
//!
//! Requests are handled one at a time. Tracing goes to stderr so it never
//! mixes with protocol output.

use std::io::{self, BufRead, Write};

use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::sqlite::SqliteTools;
use super::tools;
use super::types::{codes, InitializeResult, Request, Response, ToolCall, ToolList};

pub const SERVER_NAME: &str = "sqlite-mcp-server";

/// Serve on the process's stdin/stdout until stdin closes.
pub fn run(tools: &SqliteTools) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    serve(tools, stdin.lock(), stdout.lock())
}

/// Serve requests read from `input`, writing one response line per request.
pub fn serve(tools: &SqliteTools, input: impl BufRead, mut output: impl Write) -> io::Result<()> {
    info!(db = %tools.db_path().display(), "MCP server starting");

    for line in input.lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                error!(error = %e, "failed to read stdin");
                break;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        debug!(request = %trimmed, "received request");

        let response = match serde_json::from_str::<Request>(trimmed) {
            Ok(request) => handle_request(tools, &request),
            Err(e) => {
                warn!(error = %e, "invalid JSON-RPC request");
                Some(Response::error(
                    None,
                    codes::PARSE_ERROR,
                    format!("Parse error: {}", e),
                ))
            }
        };

        if let Some(response) = response {
            write_response(&mut output, &response)?;
        }
    }

    info!("MCP server shutting down");
    Ok(())
}

/// Handle one request. Notifications produce no response.
pub fn handle_request(tools: &SqliteTools, request: &Request) -> Option<Response> {
    let id = request.id.clone();

    if request.jsonrpc != "2.0" {
        return (!request.is_notification()).then(|| {
            Response::error(id, codes::INVALID_REQUEST, "jsonrpc must be \"2.0\"")
        });
    }

    match request.method.as_str() {
        "initialize" => {
            info!("client initializing");
            Some(Response::from_serializable(
                id,
                &InitializeResult::new(SERVER_NAME),
            ))
        }

        "notifications/initialized" => {
            info!("client initialized");
            None
        }

        "tools/list" => Some(Response::from_serializable(
            id,
            &ToolList {
                tools: tools::list_tools(),
            },
        )),

        "tools/call" => {
            let call: ToolCall = match serde_json::from_value(request.params.clone()) {
                Ok(c) => c,
                Err(e) => {
                    return Some(Response::error(
                        id,
                        codes::INVALID_PARAMS,
                        format!("Invalid params: {}", e),
                    ));
                }
            };
            debug!(tool = %call.name, "calling tool");
            let output = tools::call_tool(tools, &call.name, &call.arguments);
            Some(Response::from_serializable(id, &output))
        }

        "ping" => Some(Response::success(id, Value::Object(Default::default()))),

        _ if request.is_notification() => {
            debug!(method = %request.method, "ignoring notification");
            None
        }

        _ => {
            warn!(method = %request.method, "unknown method");
            Some(Response::error(
                id,
                codes::METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            ))
        }
    }
}

fn write_response(output: &mut impl Write, response: &Response) -> io::Result<()> {
    let json = serde_json::to_string(response)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    debug!(response = %json, "sending response");
    writeln!(output, "{}", json)?;
    output.flush()
}
