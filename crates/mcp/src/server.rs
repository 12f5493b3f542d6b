// MCP server: JSON-RPC dispatch and the stdio serve loop

use crate::codec::{RequestCodec, RequestLine};
use crate::envelope::is_failure;
use crate::error::McpError;
use crate::gateway::ToolGateway;
use crate::protocol::*;
use crate::resources;
use anyhow::{Context, Result};
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio_util::codec::FramedRead;

pub struct McpServer {
    gateway: ToolGateway,
}

impl McpServer {
    pub fn new(gateway: ToolGateway) -> Self {
        Self { gateway }
    }

    /// Serve newline-delimited JSON-RPC on stdin/stdout until stdin closes.
    pub async fn serve_stdio(&self) -> Result<()> {
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve one request per line from `reader`, writing one response line per
    /// request to `writer`. Requests are handled to completion one at a time.
    ///
    /// A line that is not valid UTF-8 or is too long gets a parse error and
    /// the loop moves on; only a failing reader or writer stops it.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        self.serve_with_codec(reader, writer, RequestCodec::new()).await
    }

    async fn serve_with_codec<R, W>(
        &self,
        reader: R,
        mut writer: W,
        codec: RequestCodec,
    ) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = FramedRead::new(reader, codec);
        tracing::info!("MCP server listening on stdio");

        while let Some(frame) = lines.next().await {
            let response = match frame.context("Failed to read request line")? {
                RequestLine::Line(line) if line.trim().is_empty() => continue,
                RequestLine::Line(line) => self.handle_request(&line).await,
                RequestLine::Malformed(reason) => {
                    tracing::warn!(reason, "malformed request line");
                    Some(encode_response(&JsonRpcResponse::error(
                        Value::Null,
                        JsonRpcError::parse_error(format!("Parse error: {}", reason)),
                    )))
                }
            };

            if let Some(response) = response {
                writer.write_all(response.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }

        tracing::info!("Input closed, MCP server stopping");
        Ok(())
    }

    /// Handle one raw JSON-RPC message. Returns `None` for notifications.
    pub async fn handle_request(&self, raw: &str) -> Option<String> {
        let response = match serde_json::from_str::<JsonRpcRequest>(raw) {
            Ok(request) => self.dispatch(request).await?,
            Err(e) => JsonRpcResponse::error(
                Value::Null,
                JsonRpcError::parse_error(format!("Parse error: {}", e)),
            ),
        };

        Some(encode_response(&response))
    }

    async fn dispatch(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(
                request.id.unwrap_or(Value::Null),
                JsonRpcError::invalid_request("Invalid JSON-RPC version"),
            ));
        }

        if request.is_notification() {
            tracing::debug!(method = %request.method, "notification received");
            return None;
        }

        let id = request.id.unwrap_or(Value::Null);
        let params = request.params.unwrap_or(Value::Null);

        let result = match request.method.as_str() {
            "initialize" => Ok(self.initialize()),
            "ping" => Ok(serde_json::json!({})),
            "tools/list" => self.list_tools(),
            "tools/call" => self.call_tool(params).await,
            "resources/list" => self.list_resources(),
            "resources/read" => self.read_resource(params),
            method => {
                return Some(JsonRpcResponse::error(
                    id,
                    JsonRpcError::method_not_found(method),
                ))
            }
        };

        Some(match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => {
                tracing::warn!(method = %request.method, error = %e, "request failed");
                JsonRpcResponse::error(id, e.into())
            }
        })
    }

    fn initialize(&self) -> Value {
        let result = InitializeResult {
            protocol_version: MCP_PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability { list_changed: false }),
                resources: Some(ResourcesCapability {
                    subscribe: false,
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };
        serde_json::to_value(result).unwrap_or(Value::Null)
    }

    fn list_tools(&self) -> Result<Value, McpError> {
        Ok(serde_json::to_value(ListToolsResult {
            tools: self.gateway.list_tools(),
        })?)
    }

    async fn call_tool(&self, params: Value) -> Result<Value, McpError> {
        let params: CallToolParams = parse_params(params)?;
        let output = self.gateway.invoke(&params.name, params.arguments).await?;

        let result = CallToolResult {
            is_error: is_failure(&output).then_some(true),
            content: vec![ToolContent::text(serde_json::to_string_pretty(&output)?)],
        };
        Ok(serde_json::to_value(result)?)
    }

    fn list_resources(&self) -> Result<Value, McpError> {
        Ok(serde_json::to_value(ListResourcesResult {
            resources: resources::list_resources(),
        })?)
    }

    fn read_resource(&self, params: Value) -> Result<Value, McpError> {
        let params: ReadResourceParams = parse_params(params)?;
        let contents = resources::read_resource(&params.uri)?;
        Ok(serde_json::to_value(ReadResourceResult {
            contents: vec![contents],
        })?)
    }
}

fn encode_response(response: &JsonRpcResponse) -> String {
    serde_json::to_string(response).unwrap_or_else(|_| {
        r#"{"jsonrpc":"2.0","id":null,"error":{"code":-32603,"message":"serialization failed"}}"#
            .to_string()
    })
}

fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T, McpError> {
    serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))
}
