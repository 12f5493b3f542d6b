//! Filter option endpoint.

use crate::client::DandiClient;
use crate::error::DandiResult;
use serde_json::Value;

/// Filter options API.
pub struct FiltersApi<'a> {
    client: &'a DandiClient,
}

impl<'a> FiltersApi<'a> {
    pub(crate) fn new(client: &'a DandiClient) -> Self {
        Self { client }
    }

    /// Values available for the search filters (species, approaches, ...).
    pub async fn options(&self) -> DandiResult<Value> {
        self.client.http.get("/api/filter-options/").await
    }
}
