//! Benchmark configuration.
//!
//! Values come from built-in defaults, then an optional TOML file, then
//! command-line flags (which also read `ES_URL` from the environment).

use crate::error::Result;
use esbench_client::{
    ClientError, EsClient, EsClientBuilder, IndexSettings, TransportKind, TransportOptions,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_URL: &str = "http://localhost:9200";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    pub server: ServerConfig,
    pub index: IndexConfig,
    pub data: DataConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub url: String,
    pub timeout_secs: u64,
    pub pool_max_idle: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            timeout_secs: 30,
            pool_max_idle: 16,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub shards: u32,
    pub replicas: u32,
    /// Refresh interval restored once a bulk load is done
    pub bulk_refresh_interval: String,
    /// Health a new index must reach before it is loaded
    pub wait_for_status: String,
    pub health_timeout_secs: u64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        let settings = IndexSettings::default();
        Self {
            shards: settings.shards,
            replicas: settings.replicas,
            bulk_refresh_interval: "1s".to_string(),
            wait_for_status: "yellow".to_string(),
            health_timeout_secs: 30,
        }
    }
}

impl IndexConfig {
    pub fn settings(&self) -> IndexSettings {
        IndexSettings {
            shards: self.shards,
            replicas: self.replicas,
        }
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub words: usize,
    pub word_len: usize,
    pub seed: Option<u64>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            words: 1000,
            word_len: 32,
            seed: None,
        }
    }
}

impl BenchConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads the file if one is given, otherwise returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                let config = Self::from_toml(&text)?;
                tracing::debug!(path = %path.display(), "loaded config file");
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn with_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.server.url = url;
        }
        self
    }

    pub fn with_timeout(mut self, timeout_secs: Option<u64>) -> Self {
        if let Some(secs) = timeout_secs {
            self.server.timeout_secs = secs;
        }
        self
    }

    pub fn transport_options(&self) -> TransportOptions {
        TransportOptions {
            timeout: Duration::from_secs(self.server.timeout_secs),
            pool_max_idle: self.server.pool_max_idle,
        }
    }

    pub fn client(&self, transport: TransportKind) -> std::result::Result<EsClient, ClientError> {
        EsClientBuilder::new(&self.server.url)
            .transport(transport)
            .options(self.transport_options())
            .build()
    }
}
