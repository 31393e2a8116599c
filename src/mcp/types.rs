//! JSON-RPC 2.0 envelopes and the MCP messages the server speaks.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Standard JSON-RPC error codes.
pub mod codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;
}

// ─── JSON-RPC ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub jsonrpc: String,
    /// Absent for notifications.
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

impl Request {
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

#[derive(Debug, Serialize)]
pub struct Response {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

#[derive(Debug, Serialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl Response {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id: id.unwrap_or(Value::Null),
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<Value>, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id: id.unwrap_or(Value::Null),
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
            }),
        }
    }

    /// Serialize `result` into a success response, or an internal error if it cannot be.
    pub fn from_serializable(id: Option<Value>, result: &impl Serialize) -> Self {
        match serde_json::to_value(result) {
            Ok(value) => Self::success(id, value),
            Err(e) => Self::error(id, codes::INTERNAL_ERROR, format!("Serialization failed: {}", e)),
        }
    }
}

// ─── MCP ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: &'static str,
    pub capabilities: Capabilities,
    pub server_info: ServerInfo,
}

impl InitializeResult {
    pub fn new(name: &str) -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION,
            capabilities: Capabilities {
                tools: Value::Object(Default::default()),
            },
            server_info: ServerInfo {
                name: name.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Capabilities {
    pub tools: Value,
}

#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

#[derive(Debug, Serialize)]
pub struct ToolList {
    pub tools: Vec<ToolDefinition>,
}

#[derive(Debug, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

#[derive(Debug, Serialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

/// Result of `tools/call`. Tool failures are results with `isError`, not RPC errors.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolOutput {
    pub content: Vec<TextContent>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolOutput {
    pub fn text(text: String) -> Self {
        Self {
            content: vec![TextContent { kind: "text", text }],
            is_error: false,
        }
    }

    /// Pretty JSON of `payload` as the single text block.
    pub fn json(payload: &impl Serialize) -> Self {
        match serde_json::to_string_pretty(payload) {
            Ok(text) => Self::text(text),
            Err(e) => Self::error(format!("Serialization failed: {}", e)),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            content: vec![TextContent {
                kind: "text",
                text: message,
            }],
            is_error: true,
        }
    }

    pub fn first_text(&self) -> &str {
        self.content.first().map(|c| c.text.as_str()).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_notification_has_no_id() {
        let req: Request =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
                .unwrap();
        assert!(req.is_notification());
        assert_eq!(req.params, Value::Null);
    }

    #[test]
    fn test_error_response_shape() {
        let resp = Response::error(Some(json!(4)), codes::METHOD_NOT_FOUND, "nope");
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            value,
            json!({"jsonrpc": "2.0", "id": 4, "error": {"code": -32601, "message": "nope"}})
        );
    }

    #[test]
    fn test_tool_output_flags_errors_only() {
        let ok = serde_json::to_value(ToolOutput::text("fine".into())).unwrap();
        assert!(ok.get("isError").is_none());

        let err = serde_json::to_value(ToolOutput::error("bad".into())).unwrap();
        assert_eq!(err["isError"], true);
        assert_eq!(err["content"][0]["type"], "text");
    }
}
