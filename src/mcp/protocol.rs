//! JSON-RPC 2.0 and MCP message types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::mcp;
use crate::error::AppError;

pub const JSONRPC_VERSION: &str = "2.0";

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    /// Absent or null for notifications.
    #[serde(default)]
    pub id: Value,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

impl JsonRpcRequest {
    pub fn is_notification(&self) -> bool {
        self.id.is_null()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Value, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;

    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(code: i32, message: impl Into<String>, data: Value) -> Self {
        Self {
            code,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl From<AppError> for JsonRpcError {
    fn from(error: AppError) -> Self {
        let code = match &error {
            AppError::MethodNotFound(_) => Self::METHOD_NOT_FOUND,
            AppError::UnknownTool(_) | AppError::InvalidToolArguments { .. } => {
                Self::INVALID_PARAMS
            }
            _ => Self::INTERNAL_ERROR,
        };
        Self::new(code, error.to_string())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    pub server_info: ServerInfo,
}

impl Default for InitializeResult {
    fn default() -> Self {
        Self {
            protocol_version: mcp::PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: mcp::SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerCapabilities {
    pub tools: ToolsCapability,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsCapability {
    pub list_changed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolsListResult {
    pub tools: Vec<ToolDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

/// Result of `tools/call`. Tool failures are reported here with
/// `isError: true` rather than as a JSON-RPC error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent {
                content_type: "text".to_string(),
                text: text.into(),
            }],
            is_error: false,
        }
    }

    /// Pretty-printed JSON as text content.
    pub fn json(value: &impl Serialize) -> Result<Self, AppError> {
        Ok(Self::text(serde_json::to_string_pretty(value)?))
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::text(message)
        }
    }

    /// Text of the first content item.
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().map(|c| c.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_without_id_is_notification() {
        let request: JsonRpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
                .unwrap();
        assert!(request.is_notification());
        assert!(request.params.is_null());
    }

    #[test]
    fn test_error_response_omits_result() {
        let response = JsonRpcResponse::error(json!(1), JsonRpcError::new(-32601, "nope"));
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("result").is_none());
        assert_eq!(value["error"]["code"], -32601);
        assert!(value["error"].get("data").is_none());
    }

    #[test]
    fn test_app_error_codes() {
        let e: JsonRpcError = AppError::MethodNotFound("x".into()).into();
        assert_eq!(e.code, JsonRpcError::METHOD_NOT_FOUND);
        let e: JsonRpcError = AppError::invalid_tool_arguments("t", "m").into();
        assert_eq!(e.code, JsonRpcError::INVALID_PARAMS);
        let e: JsonRpcError = AppError::api_not_found("u").into();
        assert_eq!(e.code, JsonRpcError::INTERNAL_ERROR);
    }

    #[test]
    fn test_initialize_result_shape() {
        let value = serde_json::to_value(InitializeResult::default()).unwrap();
        assert_eq!(value["protocolVersion"], mcp::PROTOCOL_VERSION);
        assert_eq!(value["serverInfo"]["name"], mcp::SERVER_NAME);
        assert_eq!(value["capabilities"]["tools"]["listChanged"], false);
    }

    #[test]
    fn test_tool_result_error_flag() {
        let ok = serde_json::to_value(ToolResult::text("hi")).unwrap();
        assert!(ok.get("isError").is_none());
        assert_eq!(ok["content"][0]["type"], "text");

        let err = serde_json::to_value(ToolResult::error("boom")).unwrap();
        assert_eq!(err["isError"], true);
        assert_eq!(err["content"][0]["text"], "boom");
    }
}
