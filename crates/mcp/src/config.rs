use anyhow::{Context, Result};
use dandi_sdk::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Settings loaded from the optional TOML config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct McpConfig {
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl McpConfig {
    /// Load the config file if one is given and exists, otherwise use defaults.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let Some(path) = config_path else {
            return Ok(Self::default());
        };

        if !path.exists() {
            tracing::info!("Configuration file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).context("Failed to read configuration file")?;
        toml::from_str(&content).context("Failed to parse configuration file")
    }

    /// Build the client configuration. Explicit values (CLI flags or the
    /// `DANDI_API_BASE` environment variable) win over the file.
    pub fn client_config(
        &self,
        base_url: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Result<ClientConfig> {
        let raw = base_url
            .or_else(|| self.api.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&raw).with_context(|| format!("Invalid API base URL: {}", raw))?;

        let timeout = timeout_secs
            .or(self.api.timeout_secs)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        Ok(ClientConfig { base_url, timeout })
    }
}
