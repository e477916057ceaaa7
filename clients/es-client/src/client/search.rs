use super::EsClient;
use crate::protocol::{ClientError, CountResponse, SearchResponse};
use crate::transport::{Method, RequestBody};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    MatchAll,
    /// Lucene query string syntax, e.g. `title:hey OR a*`
    QueryString(String),
}

impl Query {
    pub fn string(query: impl Into<String>) -> Self {
        Query::QueryString(query.into())
    }

    pub fn to_json(&self) -> Value {
        match self {
            Query::MatchAll => json!({"match_all": {}}),
            Query::QueryString(q) => json!({"query_string": {"query": q}}),
        }
    }
}

impl EsClient {
    pub fn search(&self, index: &str, query: &Query) -> Result<SearchResponse, ClientError> {
        let body = RequestBody::json(&json!({"query": query.to_json()}))?;
        self.request(Method::Post, &format!("/{}/_search", index), Some(body))
    }

    pub fn count(&self, index: &str) -> Result<u64, ClientError> {
        let path = format!("/{}/_count", index);
        let response: CountResponse = self.request(Method::Get, &path, None)?;
        Ok(response.count)
    }
}
