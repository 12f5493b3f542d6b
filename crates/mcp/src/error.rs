//! Error types for the MCP gateway.

use crate::protocol::JsonRpcError;
use dandi_sdk::DandiError;
use thiserror::Error;

/// Result type for protocol-level operations.
pub type McpResult<T> = Result<T, McpError>;

/// Failures reported to the client as JSON-RPC errors.
#[derive(Debug, Error)]
pub enum McpError {
    /// No tool with this name is registered.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// No static resource matches this URI.
    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    /// Request params were missing or malformed.
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl McpError {
    /// Returns the JSON-RPC error code for this error.
    pub fn error_code(&self) -> i32 {
        match self {
            Self::UnknownTool(_) => JsonRpcError::METHOD_NOT_FOUND,
            Self::UnknownResource(_) => JsonRpcError::INVALID_REQUEST,
            Self::InvalidParams(_) => JsonRpcError::INVALID_PARAMS,
            Self::Serialization(_) => JsonRpcError::INTERNAL_ERROR,
        }
    }
}

impl From<McpError> for JsonRpcError {
    fn from(error: McpError) -> Self {
        JsonRpcError::custom(error.error_code(), error.to_string())
    }
}

/// Failures inside a tool. These never reach the client as protocol
/// errors; the gateway folds them into a failure envelope.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("invalid arguments: {0}")]
    InvalidArguments(serde_json::Error),

    #[error("{0}")]
    Remote(#[from] DandiError),
}
