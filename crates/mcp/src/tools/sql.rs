// SQL tools. Safety checks live in the archive, not here.

use crate::error::ToolError;
use crate::protocol::ToolSchema;
use crate::tools::{json_schema_object, parse_args, Tool};
use dandi_sdk::{DandiClient, SqlRequest};
use serde_json::Value;

fn sql_input_schema(description: &str) -> Value {
    json_schema_object(
        serde_json::json!({
            "sql": {
                "type": "string",
                "description": description,
                "maxLength": 10000
            }
        }),
        vec!["sql"],
    )
}

/// Tool to run a read-only SQL query against the archive
pub struct ExecuteSqlTool {
    client: DandiClient,
}

impl ExecuteSqlTool {
    pub fn new(client: DandiClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for ExecuteSqlTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "execute_sql".to_string(),
            description: "Execute a read-only SQL SELECT query against the DANDI metadata \
                          database. The archive validates the query and rejects anything \
                          other than SELECT on allowed tables. Use get_schema first."
                .to_string(),
            input_schema: sql_input_schema("SQL SELECT query to execute"),
        }
    }

    fn operation(&self) -> &'static str {
        "SQL execution"
    }

    async fn execute(&self, arguments: Value) -> Result<Value, ToolError> {
        let request: SqlRequest = parse_args(arguments)?;
        Ok(self.client.sql().execute(&request).await?)
    }
}

/// Tool to check a SQL query without running it
pub struct ValidateSqlTool {
    client: DandiClient,
}

impl ValidateSqlTool {
    pub fn new(client: DandiClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for ValidateSqlTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "validate_sql".to_string(),
            description: "Check whether a SQL query would be accepted by the archive without \
                          executing it."
                .to_string(),
            input_schema: sql_input_schema("SQL query to validate"),
        }
    }

    fn operation(&self) -> &'static str {
        "SQL validation"
    }

    async fn execute(&self, arguments: Value) -> Result<Value, ToolError> {
        let request: SqlRequest = parse_args(arguments)?;
        Ok(self.client.sql().validate(&request).await?)
    }
}
