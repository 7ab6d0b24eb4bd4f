use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info, warn};

use super::handlers::ToolHandlers;
use super::protocol::{
    InitializeResult, JSONRPC_VERSION, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
    ToolsListResult,
};
use super::tools::get_tool_definitions;
use crate::data_fetcher::SleeperService;
use crate::error::AppError;

/// Counter for correlating log lines of one request.
static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Line-delimited JSON-RPC server exposing the Sleeper tools.
///
/// Requests are read one per line and answered in order. Only protocol
/// messages are written to the output stream.
pub struct McpServer {
    handlers: ToolHandlers,
    initialized: bool,
}

impl McpServer {
    pub fn new(service: Arc<SleeperService>) -> Self {
        Self {
            handlers: ToolHandlers::new(service),
            initialized: false,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Serves until the input reaches end of file.
    pub async fn run<R, W>(&mut self, reader: R, mut writer: W) -> Result<(), AppError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        info!("MCP server starting");

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(&line).await {
                let json = serde_json::to_string(&response)?;
                debug!(raw = %json, "Sending JSON-RPC response");
                writer.write_all(json.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }

        info!("MCP server input closed, shutting down");
        Ok(())
    }

    /// Handles one raw input line. Returns `None` for notifications.
    pub async fn handle_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let req_id = REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed);
        debug!(req_id, raw = %line, "Received JSON-RPC message");

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                error!(req_id, error = %e, "Failed to parse JSON-RPC request");
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    JsonRpcError::new(JsonRpcError::PARSE_ERROR, e.to_string()),
                ));
            }
        };

        if request.jsonrpc != JSONRPC_VERSION {
            warn!(req_id, got = %request.jsonrpc, "Invalid JSON-RPC version");
            return Some(JsonRpcResponse::error(
                request.id,
                JsonRpcError::with_data(
                    JsonRpcError::INVALID_REQUEST,
                    "Invalid JSON-RPC version",
                    json!({"expected": JSONRPC_VERSION, "got": request.jsonrpc}),
                ),
            ));
        }

        let start = std::time::Instant::now();
        let method = request.method.clone();
        let response = self.handle_request(request).await;
        info!(
            req_id,
            method = %method,
            elapsed_ms = %start.elapsed().as_millis(),
            "JSON-RPC request handled"
        );
        response
    }

    /// Routes a parsed request. Notifications never produce a response.
    pub async fn handle_request(&mut self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let result = match request.method.as_str() {
            "initialize" => self.handle_initialize(),
            "initialized" | "notifications/initialized" => Ok(json!({})),
            "ping" => Ok(json!({})),
            "tools/list" => self.handle_tools_list(),
            "tools/call" => self.handle_tools_call(&request.params).await,
            _ => Err(AppError::MethodNotFound(request.method.clone())),
        };

        if request.is_notification() {
            if let Err(e) = result {
                warn!(method = %request.method, error = %e, "Notification handling failed");
            }
            return None;
        }

        Some(match result {
            Ok(value) => JsonRpcResponse::success(request.id, value),
            Err(e) => JsonRpcResponse::error(request.id, e.into()),
        })
    }

    fn handle_initialize(&mut self) -> Result<Value, AppError> {
        self.initialized = true;
        info!("MCP client initialized");
        Ok(serde_json::to_value(InitializeResult::default())?)
    }

    fn handle_tools_list(&self) -> Result<Value, AppError> {
        let tools = get_tool_definitions(self.handlers.service().default_season());
        Ok(serde_json::to_value(ToolsListResult { tools })?)
    }

    async fn handle_tools_call(&self, params: &Value) -> Result<Value, AppError> {
        let name = params["name"].as_str().ok_or_else(|| {
            AppError::invalid_tool_arguments("tools/call", "Missing 'name' parameter")
        })?;

        info!(tool = %name, "Dispatching tool call");
        let result = self.handlers.dispatch(name, &params["arguments"]).await?;
        if result.is_error {
            warn!(tool = %name, "Tool call returned an error result");
        }
        Ok(serde_json::to_value(result)?)
    }
}
