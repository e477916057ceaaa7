mod builder;
mod bulk;
mod index;
mod search;

pub use builder::EsClientBuilder;
pub use bulk::{encode_bulk, BulkBuffer, BulkFlush, ImportSummary};
pub use index::IndexSettings;
pub use search::Query;

use crate::protocol::{ClientError, ClusterInfo};
use crate::transport::{Method, RawResponse, RequestBody, Transport, TransportKind};
use serde::de::DeserializeOwned;

pub struct EsClient {
    base_url: String,
    transport: Box<dyn Transport>,
}

impl EsClient {
    pub fn new(base_url: &str, transport: Box<dyn Transport>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport_kind(&self) -> TransportKind {
        self.transport.kind()
    }

    /// Sends a request and returns the response whatever its status.
    pub(crate) fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
    ) -> Result<RawResponse, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(
            transport = %self.transport.kind(),
            method = method.as_str(),
            path,
            "request"
        );
        let response = self.transport.send(method, &url, body)?;
        tracing::trace!(status = response.status, bytes = response.body.len(), "response");
        Ok(response)
    }

    /// Sends a request, fails on a non-2xx status and decodes the JSON body.
    pub(crate) fn request<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let response = self.send(method, path, body)?;
        let response = check_status(method, path, response)?;
        decode(path, &response.body)
    }

    pub fn info(&self) -> Result<ClusterInfo, ClientError> {
        self.request(Method::Get, "/", None)
    }

    /// True if the server answers `GET /` with a success status.
    pub fn ping(&self) -> bool {
        match self.send(Method::Get, "/", None) {
            Ok(response) => response.is_success(),
            Err(e) => {
                tracing::debug!("ping failed: {}", e);
                false
            }
        }
    }
}

pub(crate) fn check_status(
    method: Method,
    path: &str,
    response: RawResponse,
) -> Result<RawResponse, ClientError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ClientError::Status {
            status: response.status,
            method: method.as_str(),
            path: path.to_string(),
            body: response.body,
        })
    }
}

pub(crate) fn decode<T: DeserializeOwned>(path: &str, text: &str) -> Result<T, ClientError> {
    if text.is_empty() {
        return Err(ClientError::Protocol(format!("Empty response for {}", path)));
    }
    serde_json::from_str(text).map_err(|e| {
        ClientError::Protocol(format!(
            "Failed to parse response for {}: {} - Text: {}",
            path, e, text
        ))
    })
}
