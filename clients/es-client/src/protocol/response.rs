use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Acknowledged {
    #[serde(default)]
    pub acknowledged: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BulkResponse {
    #[serde(default)]
    pub took: u64,
    #[serde(default)]
    pub errors: bool,
    #[serde(default)]
    pub items: Vec<Value>,
}

impl BulkResponse {
    /// Number of items whose action result carries an `error` object.
    ///
    /// Each item is keyed by its action name, e.g. `{"index": {...}}`.
    pub fn failed_items(&self) -> usize {
        if !self.errors {
            return 0;
        }
        self.items
            .iter()
            .filter(|item| {
                item.as_object()
                    .and_then(|obj| obj.values().next())
                    .map(|result| result.get("error").is_some())
                    .unwrap_or(false)
            })
            .count()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub took: u64,
    #[serde(default)]
    pub timed_out: bool,
    pub hits: Hits,
}

impl SearchResponse {
    pub fn total(&self) -> u64 {
        self.hits.total.value()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Hits {
    pub total: Total,
    #[serde(default)]
    pub hits: Vec<Value>,
}

/// `hits.total` is a bare number before 7.0 and an object afterwards.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Total {
    Count(u64),
    Object { value: u64, relation: String },
}

impl Total {
    pub fn value(&self) -> u64 {
        match self {
            Total::Count(n) => *n,
            Total::Object { value, .. } => *value,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CountResponse {
    pub count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClusterInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cluster_name: String,
    pub version: Version,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Version {
    pub number: String,
}

/// `GET /_cluster/health/{index}`. A wait that times out still carries a body,
/// with `timed_out` set and the status reached so far.
#[derive(Debug, Clone, Deserialize)]
pub struct ClusterHealth {
    #[serde(default)]
    pub cluster_name: String,
    pub status: String,
    #[serde(default)]
    pub timed_out: bool,
}
