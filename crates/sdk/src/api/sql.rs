//! SQL execution and validation endpoints.
//!
//! The archive owns all SQL safety checks; queries are sent as-is.

use crate::client::DandiClient;
use crate::error::DandiResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// SQL API for running and validating read-only queries.
pub struct SqlApi<'a> {
    client: &'a DandiClient,
}

impl<'a> SqlApi<'a> {
    pub(crate) fn new(client: &'a DandiClient) -> Self {
        Self { client }
    }

    /// Execute a query and return the archive's response body.
    pub async fn execute(&self, request: &SqlRequest) -> DandiResult<Value> {
        self.client.http.post("/api/sql/execute/", request).await
    }

    /// Validate a query without executing it.
    pub async fn validate(&self, request: &SqlRequest) -> DandiResult<Value> {
        self.client.http.post("/api/sql/validate/", request).await
    }
}

/// Body for SQL endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqlRequest {
    pub sql: String,
}

impl SqlRequest {
    pub fn new(sql: impl Into<String>) -> Self {
        Self { sql: sql.into() }
    }
}
