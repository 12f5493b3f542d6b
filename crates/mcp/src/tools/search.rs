// Search tools for dandisets and assets

use crate::envelope::ResponseEnvelope;
use crate::error::ToolError;
use crate::protocol::ToolSchema;
use crate::tools::{
    json_schema_object, json_schema_paging, json_schema_string, json_schema_string_array,
    parse_args, Tool,
};
use dandi_sdk::{AssetSearchRequest, DandiClient, DatasetSearchRequest};
use serde_json::Value;

/// Tool to search dandisets by metadata
pub struct SearchDatasetsTool {
    client: DandiClient,
}

impl SearchDatasetsTool {
    pub fn new(client: DandiClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for SearchDatasetsTool {
    fn schema(&self) -> ToolSchema {
        let (limit, offset) = json_schema_paging("dandisets");
        ToolSchema {
            name: "search_datasets".to_string(),
            description: "Search DANDI dandisets by name, description and metadata filters \
                          (species, approach, measurement technique, anatomy). Array filters \
                          match any of the given values."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "name": json_schema_string("Text to match against the dandiset name"),
                    "description": json_schema_string("Text to match against the dandiset description"),
                    "species": json_schema_string_array("Species names, e.g. \"Mus musculus\""),
                    "approach": json_schema_string_array("Experimental approaches, e.g. \"electrophysiological approach\""),
                    "measurement_technique": json_schema_string_array("Measurement techniques, e.g. \"spike sorting technique\""),
                    "anatomy": json_schema_string_array("Anatomical regions, e.g. \"hippocampus\""),
                    "limit": limit,
                    "offset": offset
                }),
                vec![],
            ),
        }
    }

    fn operation(&self) -> &'static str {
        "Dataset search"
    }

    async fn execute(&self, arguments: Value) -> Result<Value, ToolError> {
        let request: DatasetSearchRequest = parse_args(arguments)?;
        let page = self.client.search().datasets(&request).await?;
        Ok(ResponseEnvelope::search(page, "datasets").into_value())
    }
}

/// Tool to search assets (files) across dandisets
pub struct SearchAssetsTool {
    client: DandiClient,
}

impl SearchAssetsTool {
    pub fn new(client: DandiClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for SearchAssetsTool {
    fn schema(&self) -> ToolSchema {
        let (limit, offset) = json_schema_paging("assets");
        ToolSchema {
            name: "search_assets".to_string(),
            description: "Search DANDI assets (NWB files), optionally within one dandiset, \
                          filtered by session type, measured variables and species."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "dandiset_id": json_schema_string("Dandiset identifier, e.g. \"000003\""),
                    "session_type": json_schema_string_array("Session types to match"),
                    "variable_measured": json_schema_string_array("Measured variables, e.g. \"ElectricalSeries\""),
                    "species": json_schema_string_array("Species names"),
                    "limit": limit,
                    "offset": offset
                }),
                vec![],
            ),
        }
    }

    fn operation(&self) -> &'static str {
        "Asset search"
    }

    async fn execute(&self, arguments: Value) -> Result<Value, ToolError> {
        let request: AssetSearchRequest = parse_args(arguments)?;
        let page = self.client.search().assets(&request).await?;
        Ok(ResponseEnvelope::search(page, "assets").into_value())
    }
}
