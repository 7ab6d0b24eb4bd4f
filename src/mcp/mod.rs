//! Model Context Protocol surface: JSON-RPC 2.0 over line-delimited stdio.

pub mod handlers;
pub mod protocol;
pub mod server;
pub mod tools;

pub use handlers::ToolHandlers;
pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, ToolDefinition, ToolResult};
pub use server::McpServer;
pub use tools::get_tool_definitions;
