//! Error handling utilities for MCP server

use regimen_core::ManagerError;
use rmcp::ErrorData;

/// Converts a manager error into an MCP error, prefixed with `message`
pub fn to_mcp_error(message: &str, error: &ManagerError) -> ErrorData {
    ErrorData::internal_error(format!("{message}: {error}"), None)
}
