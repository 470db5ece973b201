//! Bus connection settings.

use crate::error::ClientError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Where a consumer group starts reading when it has no committed offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetReset {
    #[default]
    Earliest,
    Latest,
}

/// Settings shared by producers and consumers.
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```toml
/// bootstrap_servers = "broker1:9092,broker2:9092"
/// topics = ["fabric-mb-public-test1", "fabric-mb-public-test2"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusConfig {
    /// Comma-separated `host:port` list.
    pub bootstrap_servers: String,
    pub schema_registry_url: String,
    pub group_id: String,
    pub auto_offset_reset: OffsetReset,
    /// Topics a consumer subscribes to.
    pub topics: Vec<String>,
    pub poll_timeout_ms: u64,
    /// Upper bound on waiting for a produce acknowledgment.
    pub produce_timeout_ms: u64,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            bootstrap_servers: "localhost:9092".into(),
            schema_registry_url: "http://localhost:8081".into(),
            group_id: "actorbus".into(),
            auto_offset_reset: OffsetReset::Earliest,
            topics: Vec::new(),
            poll_timeout_ms: 250,
            produce_timeout_ms: 5_000,
        }
    }
}

impl BusConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ClientError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        if self.bootstrap_servers.trim().is_empty() {
            return Err(ClientError::Config("bootstrap_servers is empty".into()));
        }
        if self.topics.is_empty() {
            return Err(ClientError::Config("no topics configured".into()));
        }
        if let Some(topic) = self.topics.iter().find(|t| t.trim().is_empty()) {
            return Err(ClientError::Config(format!("invalid topic name {topic:?}")));
        }
        if self.poll_timeout_ms == 0 || self.produce_timeout_ms == 0 {
            return Err(ClientError::Config("timeouts must be positive".into()));
        }
        Ok(())
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }

    pub fn produce_timeout(&self) -> Duration {
        Duration::from_millis(self.produce_timeout_ms)
    }
}
