// MCP (Model Context Protocol) server for the DANDI archive.
// Exposes the archive's search, SQL and schema endpoints as tools, plus
// static documentation resources, over JSON-RPC on stdio.

pub mod codec;
pub mod config;
pub mod envelope;
pub mod error;
pub mod gateway;
pub mod protocol;
pub mod resources;
pub mod server;
pub mod tools;

pub use config::McpConfig;
pub use envelope::ResponseEnvelope;
pub use error::{McpError, McpResult, ToolError};
pub use gateway::ToolGateway;
pub use server::McpServer;
