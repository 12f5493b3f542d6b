//! Tool Gateway: resolves a tool by name and normalizes every outcome.

use crate::envelope::ResponseEnvelope;
use crate::error::{McpError, McpResult};
use crate::protocol::ToolSchema;
use crate::tools::{default_registry, ToolRegistry};
use dandi_sdk::DandiClient;
use serde_json::Value;
use tracing::{info, warn};

pub struct ToolGateway {
    registry: ToolRegistry,
}

impl ToolGateway {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    /// Gateway with the full archive tool catalog.
    pub fn for_client(client: DandiClient) -> Self {
        Self::new(default_registry(client))
    }

    pub fn list_tools(&self) -> Vec<ToolSchema> {
        self.registry.list_schemas()
    }

    /// Invoke a tool.
    ///
    /// Only an unknown tool name is an error; every failure inside the tool
    /// comes back as a `{"success": false, "error": ...}` envelope.
    pub async fn invoke(&self, tool_name: &str, arguments: Value) -> McpResult<Value> {
        let tool = self
            .registry
            .get(tool_name)
            .ok_or_else(|| McpError::UnknownTool(tool_name.to_string()))?;

        info!(tool = tool_name, "invoking tool");

        match tool.execute(arguments).await {
            Ok(output) => Ok(output),
            Err(e) => {
                warn!(tool = tool_name, error = %e, "tool failed");
                Ok(ResponseEnvelope::failure(tool.operation(), e).into_value())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gateway_for(base_url: &str) -> ToolGateway {
        let client = DandiClient::builder().base_url(base_url).build().unwrap();
        ToolGateway::for_client(client)
    }

    #[test]
    fn test_catalog_lists_every_tool() {
        let gateway = gateway_for("http://localhost:8000");
        let names: Vec<String> = gateway.list_tools().into_iter().map(|t| t.name).collect();

        assert_eq!(
            names,
            vec![
                "search_datasets",
                "search_assets",
                "execute_sql",
                "validate_sql",
                "get_schema",
                "get_full_schema",
                "get_filter_options",
            ]
        );
    }

    #[tokio::test]
    async fn test_unknown_tool_is_protocol_error() {
        let gateway = gateway_for("http://localhost:8000");

        let err = gateway.invoke("drop_database", json!({})).await.unwrap_err();
        assert!(matches!(err, McpError::UnknownTool(ref name) if name == "drop_database"));
    }

    #[tokio::test]
    async fn test_remote_failure_becomes_envelope() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/sql/execute/"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"error": "Table not allowed"})),
            )
            .mount(&server)
            .await;

        let gateway = gateway_for(&server.uri());
        let output = gateway
            .invoke("execute_sql", json!({"sql": "SELECT * FROM auth_user"}))
            .await
            .unwrap();

        assert_eq!(
            output,
            json!({"success": false, "error": "SQL execution failed: Table not allowed"})
        );
    }

    #[tokio::test]
    async fn test_missing_table_list_becomes_envelope() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/sql/schema/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = gateway_for(&server.uri());
        let output = gateway.invoke("get_full_schema", Value::Null).await.unwrap();

        assert_eq!(
            output,
            json!({"success": false, "error": "Full schema retrieval failed: no table list found"})
        );
    }

    #[tokio::test]
    async fn test_bad_arguments_become_envelope() {
        let gateway = gateway_for("http://localhost:8000");

        let output = gateway
            .invoke("search_assets", json!({"limit": "ten"}))
            .await
            .unwrap();

        assert_eq!(output["success"], false);
        let error = output["error"].as_str().unwrap();
        assert!(error.starts_with("Asset search failed: invalid arguments"));
    }
}
