use super::{check_status, decode, EsClient};
use crate::protocol::{Acknowledged, ClientError, ClusterHealth};
use crate::transport::{Method, RequestBody};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

/// Server side wait, e.g. `30s`. Sub-second timeouts round up to one second.
fn timeout_param(timeout: Duration) -> String {
    format!("{}s", timeout.as_secs().max(1))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexSettings {
    pub shards: u32,
    pub replicas: u32,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            shards: 1,
            replicas: 0,
        }
    }
}

impl IndexSettings {
    pub fn to_json(&self) -> Value {
        json!({
            "settings": {
                "number_of_shards": self.shards,
                "number_of_replicas": self.replicas
            }
        })
    }
}

impl EsClient {
    /// Deletes an index. Returns false if it did not exist.
    pub fn delete_index(&self, name: &str) -> Result<bool, ClientError> {
        let path = format!("/{}", name);
        let response = self.send(Method::Delete, &path, None)?;
        if response.is_not_found() {
            tracing::debug!(index = name, "index did not exist");
            return Ok(false);
        }
        check_status(Method::Delete, &path, response)?;
        Ok(true)
    }

    pub fn create_index(&self, name: &str, settings: &IndexSettings) -> Result<(), ClientError> {
        let body = RequestBody::json(&settings.to_json())?;
        let ack: Acknowledged = self.request(Method::Put, &format!("/{}", name), Some(body))?;
        if !ack.acknowledged {
            tracing::warn!(index = name, "index creation not acknowledged");
        }
        Ok(())
    }

    /// Blocks until `index` reaches `status` (`green`, `yellow` or `red`) or
    /// the server gives up after `timeout`.
    ///
    /// Elasticsearch answers a timed out wait with 408 and the health reached
    /// so far; that becomes [`ClientError::Unhealthy`].
    pub fn wait_for_health(
        &self,
        index: &str,
        status: &str,
        timeout: Duration,
    ) -> Result<ClusterHealth, ClientError> {
        let path = format!(
            "/_cluster/health/{}?wait_for_status={}&timeout={}",
            index,
            status,
            timeout_param(timeout)
        );
        let response = self.send(Method::Get, &path, None)?;
        let response = if response.status == 408 {
            response
        } else {
            check_status(Method::Get, &path, response)?
        };

        let health: ClusterHealth = decode(&path, &response.body)?;
        if health.timed_out {
            return Err(ClientError::Unhealthy {
                index: index.to_string(),
                status: health.status,
                wanted: status.to_string(),
            });
        }
        tracing::debug!(index, status = %health.status, "index healthy");
        Ok(health)
    }

    pub fn index_exists(&self, name: &str) -> Result<bool, ClientError> {
        let path = format!("/{}", name);
        let response = self.send(Method::Head, &path, None)?;
        if response.is_not_found() {
            return Ok(false);
        }
        check_status(Method::Head, &path, response)?;
        Ok(true)
    }

    pub fn refresh(&self, name: &str) -> Result<(), ClientError> {
        self.request::<Value>(Method::Post, &format!("/{}/_refresh", name), None)?;
        Ok(())
    }

    pub fn update_settings(&self, name: &str, settings: &Value) -> Result<(), ClientError> {
        let body = RequestBody::json(settings)?;
        self.request::<Acknowledged>(Method::Put, &format!("/{}/_settings", name), Some(body))?;
        Ok(())
    }

    pub fn set_refresh_interval(&self, name: &str, interval: &str) -> Result<(), ClientError> {
        self.update_settings(name, &json!({"index": {"refresh_interval": interval}}))
    }

    /// Disables periodic refresh while the index is bulk loaded.
    pub fn start_bulk(&self, name: &str) -> Result<(), ClientError> {
        tracing::debug!(index = name, "bulk mode on");
        self.set_refresh_interval(name, "-1")
    }

    /// Restores the refresh interval after a bulk load.
    pub fn stop_bulk(&self, name: &str, interval: &str) -> Result<(), ClientError> {
        tracing::debug!(index = name, interval, "bulk mode off");
        self.set_refresh_interval(name, interval)
    }
}
