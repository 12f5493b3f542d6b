//! Static documentation and example resources.

use crate::error::{McpError, McpResult};
use crate::protocol::{ResourceContents, ResourceDescriptor};

const MARKDOWN: &str = "text/markdown";
const JSON: &str = "application/json";

struct StaticResource {
    path: &'static str,
    name: &'static str,
    description: &'static str,
    mime_type: &'static str,
    text: &'static str,
}

impl StaticResource {
    fn uri(&self) -> String {
        format!("dandi:/{}", self.path)
    }
}

const RESOURCES: &[StaticResource] = &[
    StaticResource {
        path: "/docs/basic-search",
        name: "Basic search guide",
        description: "How to find dandisets and assets with the search tools",
        mime_type: MARKDOWN,
        text: include_str!("../content/basic-search.md"),
    },
    StaticResource {
        path: "/docs/sql-queries",
        name: "SQL query guide",
        description: "Writing read-only SQL queries against the archive metadata",
        mime_type: MARKDOWN,
        text: include_str!("../content/sql-queries.md"),
    },
    StaticResource {
        path: "/docs/schema",
        name: "Schema guide",
        description: "Discovering tables and columns available to SQL queries",
        mime_type: MARKDOWN,
        text: include_str!("../content/schema.md"),
    },
    StaticResource {
        path: "/examples/basic",
        name: "Search examples",
        description: "Example search tool invocations",
        mime_type: JSON,
        text: include_str!("../content/examples-basic.json"),
    },
    StaticResource {
        path: "/examples/sql",
        name: "SQL examples",
        description: "Example SQL tool invocations",
        mime_type: JSON,
        text: include_str!("../content/examples-sql.json"),
    },
];

pub fn list_resources() -> Vec<ResourceDescriptor> {
    RESOURCES
        .iter()
        .map(|r| ResourceDescriptor {
            uri: r.uri(),
            name: r.name.to_string(),
            description: r.description.to_string(),
            mime_type: r.mime_type.to_string(),
        })
        .collect()
}

/// Resolve a resource by the path suffix of its URI.
pub fn read_resource(uri: &str) -> McpResult<ResourceContents> {
    let resource = RESOURCES
        .iter()
        .find(|r| uri.ends_with(r.path))
        .ok_or_else(|| McpError::UnknownResource(uri.to_string()))?;

    Ok(ResourceContents {
        uri: uri.to_string(),
        mime_type: resource.mime_type.to_string(),
        text: resource.text.to_string(),
    })
}
