//! Dataset and asset search endpoints.

use crate::client::DandiClient;
use crate::error::DandiResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Search API for dandisets and assets.
pub struct SearchApi<'a> {
    client: &'a DandiClient,
}

impl<'a> SearchApi<'a> {
    pub(crate) fn new(client: &'a DandiClient) -> Self {
        Self { client }
    }

    /// Search dandisets with metadata filters.
    pub async fn datasets(&self, request: &DatasetSearchRequest) -> DandiResult<SearchPage> {
        self.client
            .http
            .get_with_query("/api/search/", &request.query_pairs())
            .await
    }

    /// Search assets (files) within dandisets.
    pub async fn assets(&self, request: &AssetSearchRequest) -> DandiResult<SearchPage> {
        self.client
            .http
            .get_with_query("/api/assets/search/", &request.query_pairs())
            .await
    }
}

/// Filters for dandiset search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetSearchRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub species: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub approach: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub measurement_technique: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub anatomy: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl DatasetSearchRequest {
    /// Query string pairs in field order, one pair per array element.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = QueryPairs::default();
        pairs.scalar("name", self.name.as_deref());
        pairs.scalar("description", self.description.as_deref());
        pairs.repeated("species", &self.species);
        pairs.repeated("approach", &self.approach);
        pairs.repeated("measurement_technique", &self.measurement_technique);
        pairs.repeated("anatomy", &self.anatomy);
        pairs.paging(self.limit, self.offset);
        pairs.0
    }
}

/// Filters for asset search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetSearchRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dandiset_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub session_type: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variable_measured: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub species: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl AssetSearchRequest {
    /// Query string pairs in field order, one pair per array element.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = QueryPairs::default();
        pairs.scalar("dandiset_id", self.dandiset_id.as_deref());
        pairs.repeated("session_type", &self.session_type);
        pairs.repeated("variable_measured", &self.variable_measured);
        pairs.repeated("species", &self.species);
        pairs.paging(self.limit, self.offset);
        pairs.0
    }
}

/// One page of search results as returned by the archive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub results: Vec<Value>,
    #[serde(default)]
    pub count: u64,
}

#[derive(Default)]
struct QueryPairs(Vec<(&'static str, String)>);

impl QueryPairs {
    fn scalar(&mut self, key: &'static str, value: Option<&str>) {
        // Empty strings are treated as absent.
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.0.push((key, value.to_string()));
        }
    }

    fn repeated(&mut self, key: &'static str, values: &[String]) {
        self.0.extend(values.iter().map(|v| (key, v.clone())));
    }

    fn paging(&mut self, limit: Option<u32>, offset: Option<u32>) {
        if let Some(limit) = limit {
            self.0.push(("limit", limit.to_string()));
        }
        if let Some(offset) = offset {
            self.0.push(("offset", offset.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_query_order_follows_fields() {
        let request: DatasetSearchRequest = serde_json::from_value(serde_json::json!({
            "limit": 5,
            "species": ["Mus musculus"],
            "name": "visual cortex"
        }))
        .unwrap();

        assert_eq!(
            request.query_pairs(),
            vec![
                ("name", "visual cortex".to_string()),
                ("species", "Mus musculus".to_string()),
                ("limit", "5".to_string()),
            ]
        );
    }

    #[test]
    fn test_array_elements_repeat_in_input_order() {
        let request = DatasetSearchRequest {
            approach: vec!["electrophysiology".into(), "behavioral approach".into()],
            anatomy: vec!["hippocampus".into()],
            ..Default::default()
        };

        assert_eq!(
            request.query_pairs(),
            vec![
                ("approach", "electrophysiology".to_string()),
                ("approach", "behavioral approach".to_string()),
                ("anatomy", "hippocampus".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_scalars_are_skipped() {
        let request = DatasetSearchRequest {
            name: Some(String::new()),
            offset: Some(0),
            ..Default::default()
        };

        assert_eq!(request.query_pairs(), vec![("offset", "0".to_string())]);
    }

    #[test]
    fn test_asset_query_pairs() {
        let request: AssetSearchRequest = serde_json::from_value(serde_json::json!({
            "dandiset_id": "000003",
            "variable_measured": ["ElectricalSeries", "Units"],
            "offset": 40,
            "limit": 20
        }))
        .unwrap();

        assert_eq!(
            request.query_pairs(),
            vec![
                ("dandiset_id", "000003".to_string()),
                ("variable_measured", "ElectricalSeries".to_string()),
                ("variable_measured", "Units".to_string()),
                ("limit", "20".to_string()),
                ("offset", "40".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_page_defaults() {
        let page: SearchPage = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(page.results.is_empty());
        assert_eq!(page.count, 0);
    }
}
