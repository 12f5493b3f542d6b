//! Main client for the DANDI SDK.

use crate::api::*;
use crate::config::{ClientConfig, DEFAULT_TIMEOUT};
use crate::error::{DandiError, DandiResult};
use crate::transport::HttpTransport;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Client for the DANDI archive API.
#[derive(Debug, Clone)]
pub struct DandiClient {
    pub(crate) http: HttpTransport,
}

impl DandiClient {
    /// Create a new client builder.
    pub fn builder() -> DandiClientBuilder {
        DandiClientBuilder::new()
    }

    /// Create a client from configuration.
    pub fn from_config(config: ClientConfig) -> DandiResult<Self> {
        let http = HttpTransport::new(Arc::new(config))?;
        Ok(Self { http })
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &Url {
        self.http.base_url()
    }

    /// Get the search API.
    pub fn search(&self) -> SearchApi<'_> {
        SearchApi::new(self)
    }

    /// Get the SQL API.
    pub fn sql(&self) -> SqlApi<'_> {
        SqlApi::new(self)
    }

    /// Get the schema API.
    pub fn schema(&self) -> SchemaApi<'_> {
        SchemaApi::new(self)
    }

    /// Get the filter options API.
    pub fn filters(&self) -> FiltersApi<'_> {
        FiltersApi::new(self)
    }
}

/// Builder for creating a DandiClient.
pub struct DandiClientBuilder {
    base_url: Option<String>,
    timeout: Duration,
}

impl DandiClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the base URL of the archive API.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    pub fn build(self) -> DandiResult<DandiClient> {
        let base_url_str = self
            .base_url
            .ok_or_else(|| DandiError::Config("base_url is required".to_string()))?;

        let config = ClientConfig {
            base_url: Url::parse(&base_url_str)?,
            timeout: self.timeout,
        };

        DandiClient::from_config(config)
    }
}

impl Default for DandiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
