//! Schema introspection endpoints.

use crate::client::DandiClient;
use crate::error::{DandiError, DandiResult};
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Schema API for discovering queryable tables.
pub struct SchemaApi<'a> {
    client: &'a DandiClient,
}

impl<'a> SchemaApi<'a> {
    pub(crate) fn new(client: &'a DandiClient) -> Self {
        Self { client }
    }

    /// Get the schema overview, or one table's schema when `table` is set.
    pub async fn get(&self, table: Option<&str>) -> DandiResult<Value> {
        match table {
            Some(table) => {
                self.client
                    .http
                    .get_with_query("/api/sql/schema/", &[("table", table)])
                    .await
            }
            None => self.client.http.get("/api/sql/schema/").await,
        }
    }

    /// Fetch the overview, then every allowed table's schema.
    ///
    /// Per-table requests run concurrently. A failed table is recorded as an
    /// error entry and does not fail the whole call. Tables keep the order
    /// of the overview's `allowed_tables` list.
    pub async fn full(&self) -> DandiResult<FullSchema> {
        let overview = self.get(None).await?;
        let entries = allowed_tables(&overview)?;
        debug!(tables = entries.len(), "fetching per-table schemas");

        let fetches = entries.iter().map(|entry| async move {
            let result = match entry {
                TableEntry::Name(name) => self
                    .get(Some(name.as_str()))
                    .await
                    .map_err(|e| e.to_string()),
                TableEntry::Invalid(_) => Err("table name is not a string".to_string()),
            };
            (entry.key(), result)
        });

        let mut tables = Map::new();
        for (key, result) in join_all(fetches).await {
            let entry = match result {
                Ok(schema) => schema,
                Err(reason) => {
                    warn!(table = %key, error = %reason, "table schema fetch failed");
                    serde_json::json!({ "error": format!("Failed to fetch schema for {}", key) })
                }
            };
            tables.insert(key, entry);
        }

        Ok(FullSchema {
            table_count: tables.len(),
            tables,
        })
    }
}

/// One item of the overview's `allowed_tables` list.
enum TableEntry {
    Name(String),
    /// Anything other than a string, kept as its JSON text.
    Invalid(String),
}

impl TableEntry {
    fn key(&self) -> String {
        match self {
            Self::Name(name) | Self::Invalid(name) => name.clone(),
        }
    }
}

fn allowed_tables(overview: &Value) -> DandiResult<Vec<TableEntry>> {
    let list = overview
        .get("allowed_tables")
        .and_then(Value::as_array)
        .ok_or(DandiError::MissingField("allowed_tables"))?;

    Ok(list
        .iter()
        .map(|v| match v.as_str() {
            Some(name) => TableEntry::Name(name.to_string()),
            None => TableEntry::Invalid(v.to_string()),
        })
        .collect())
}

/// Schema of every allowed table, keyed by table name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullSchema {
    pub tables: Map<String, Value>,
    pub table_count: usize,
}
