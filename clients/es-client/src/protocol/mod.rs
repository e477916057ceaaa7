mod error;
mod response;

pub use error::ClientError;
pub use response::{
    Acknowledged, BulkResponse, ClusterHealth, ClusterInfo, CountResponse, Hits, SearchResponse,
    Total, Version,
};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A document to be indexed: its `_id` and its `_source` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: u64,
    pub source: Map<String, Value>,
}

impl Document {
    pub fn new(id: u64, source: Map<String, Value>) -> Self {
        Self { id, source }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.source.get(name).and_then(|v| v.as_str())
    }
}
