// Schema and filter discovery tools

use crate::error::ToolError;
use crate::protocol::ToolSchema;
use crate::tools::{json_schema_object, json_schema_string, parse_args, Tool};
use dandi_sdk::DandiClient;
use serde::Deserialize;
use serde_json::Value;

/// Tool to describe the queryable tables
pub struct GetSchemaTool {
    client: DandiClient,
}

impl GetSchemaTool {
    pub fn new(client: DandiClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct GetSchemaArgs {
    #[serde(default)]
    table: Option<String>,
}

#[async_trait::async_trait]
impl Tool for GetSchemaTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_schema".to_string(),
            description: "Get the SQL schema overview (allowed tables), or the columns of a \
                          single table when `table` is given."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "table": json_schema_string("Table name to describe; omit for the overview")
                }),
                vec![],
            ),
        }
    }

    fn operation(&self) -> &'static str {
        "Schema retrieval"
    }

    async fn execute(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: GetSchemaArgs = parse_args(arguments)?;
        let table = args.table.as_deref().filter(|t| !t.is_empty());
        Ok(self.client.schema().get(table).await?)
    }
}

/// Tool to fetch every allowed table's schema in one call
pub struct GetFullSchemaTool {
    client: DandiClient,
}

impl GetFullSchemaTool {
    pub fn new(client: DandiClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for GetFullSchemaTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_full_schema".to_string(),
            description: "Get the column schema of every table available to SQL queries. \
                          Tables whose schema cannot be fetched are reported individually."
                .to_string(),
            input_schema: json_schema_object(serde_json::json!({}), vec![]),
        }
    }

    fn operation(&self) -> &'static str {
        "Full schema retrieval"
    }

    async fn execute(&self, _arguments: Value) -> Result<Value, ToolError> {
        let full = self.client.schema().full().await?;
        Ok(serde_json::json!({
            "success": true,
            "message": format!("Retrieved schema for {} tables", full.table_count),
            "table_count": full.table_count,
            "tables": full.tables,
        }))
    }
}

/// Tool to list the values accepted by the search filters
pub struct GetFilterOptionsTool {
    client: DandiClient,
}

impl GetFilterOptionsTool {
    pub fn new(client: DandiClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for GetFilterOptionsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_filter_options".to_string(),
            description: "List the species, approaches, measurement techniques and other \
                          values that can be used as search filters."
                .to_string(),
            input_schema: json_schema_object(serde_json::json!({}), vec![]),
        }
    }

    fn operation(&self) -> &'static str {
        "Filter options retrieval"
    }

    async fn execute(&self, _arguments: Value) -> Result<Value, ToolError> {
        Ok(self.client.filters().options().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dandi_sdk::DandiError;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> DandiClient {
        DandiClient::builder().base_url(server.uri()).build().unwrap()
    }

    #[tokio::test]
    async fn test_get_schema_with_table() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/sql/schema/"))
            .and(query_param("table", "dandisets_asset"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"columns": []})))
            .expect(1)
            .mount(&server)
            .await;

        let tool = GetSchemaTool::new(client_for(&server));
        let output = tool.execute(json!({"table": "dandisets_asset"})).await.unwrap();
        assert_eq!(output, json!({"columns": []}));
    }

    #[tokio::test]
    async fn test_get_schema_without_table() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/sql/schema/"))
            .and(query_param_is_missing("table"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"allowed_tables": ["t"]})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let tool = GetSchemaTool::new(client_for(&server));
        let output = tool.execute(Value::Null).await.unwrap();
        assert_eq!(output["allowed_tables"], json!(["t"]));
    }

    #[tokio::test]
    async fn test_full_schema_reports_count_and_failures() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/sql/schema/"))
            .and(query_param_is_missing("table"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"allowed_tables": ["ok_table", "broken_table"]})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/sql/schema/"))
            .and(query_param("table", "ok_table"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"columns": ["id"]})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/sql/schema/"))
            .and(query_param("table", "broken_table"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let tool = GetFullSchemaTool::new(client_for(&server));
        let output = tool.execute(json!({})).await.unwrap();

        assert_eq!(output["success"], true);
        assert_eq!(output["table_count"], 2);
        assert_eq!(output["tables"]["ok_table"], json!({"columns": ["id"]}));
        assert_eq!(
            output["tables"]["broken_table"],
            json!({"error": "Failed to fetch schema for broken_table"})
        );
    }

    #[tokio::test]
    async fn test_full_schema_without_table_list() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/sql/schema/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"version": 1})))
            .expect(1)
            .mount(&server)
            .await;

        let tool = GetFullSchemaTool::new(client_for(&server));
        let err = tool.execute(json!({})).await.unwrap_err();

        assert!(matches!(
            err,
            ToolError::Remote(DandiError::MissingField("allowed_tables"))
        ));
        assert_eq!(err.to_string(), "no table list found");
    }

    #[tokio::test]
    async fn test_filter_options_relayed() {
        let server = MockServer::start().await;
        let options = json!({"species": ["Mus musculus", "Homo sapiens"], "approach": []});

        Mock::given(method("GET"))
            .and(path("/api/filter-options/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(options.clone()))
            .mount(&server)
            .await;

        let tool = GetFilterOptionsTool::new(client_for(&server));
        assert_eq!(tool.execute(Value::Null).await.unwrap(), options);
    }
}
