pub mod schema;
pub mod search;
pub mod sql;
mod registry;

pub use registry::{
    json_schema_object, json_schema_paging, json_schema_string, json_schema_string_array,
    parse_args, Tool, ToolRegistry,
};
pub use schema::{GetFilterOptionsTool, GetFullSchemaTool, GetSchemaTool};
pub use search::{SearchAssetsTool, SearchDatasetsTool};
pub use sql::{ExecuteSqlTool, ValidateSqlTool};

use dandi_sdk::DandiClient;
use std::sync::Arc;

/// Registry with every archive tool, in catalog order.
pub fn default_registry(client: DandiClient) -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    // Search
    registry.register(Arc::new(SearchDatasetsTool::new(client.clone())));
    registry.register(Arc::new(SearchAssetsTool::new(client.clone())));

    // SQL
    registry.register(Arc::new(ExecuteSqlTool::new(client.clone())));
    registry.register(Arc::new(ValidateSqlTool::new(client.clone())));

    // Schema
    registry.register(Arc::new(GetSchemaTool::new(client.clone())));
    registry.register(Arc::new(GetFullSchemaTool::new(client.clone())));
    registry.register(Arc::new(GetFilterOptionsTool::new(client)));

    registry
}
