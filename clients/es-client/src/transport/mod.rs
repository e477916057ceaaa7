//! HTTP transports underneath [`EsClient`](crate::EsClient).
//!
//! Both implementations are blocking and keep connections alive between
//! requests; only the HTTP library differs.

mod reqwest_transport;
mod ureq_transport;

pub use reqwest_transport::ReqwestTransport;
pub use ureq_transport::UreqTransport;

use crate::protocol::ClientError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_NDJSON: &str = "application/x-ndjson";

pub trait Transport: Send + Sync {
    fn kind(&self) -> TransportKind;

    fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<RequestBody>,
    ) -> Result<RawResponse, ClientError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RequestBody {
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl RequestBody {
    pub fn json(value: &serde_json::Value) -> Result<Self, ClientError> {
        Ok(Self {
            content_type: CONTENT_TYPE_JSON,
            bytes: serde_json::to_vec(value)?,
        })
    }

    pub fn ndjson(bytes: Vec<u8>) -> Self {
        Self {
            content_type: CONTENT_TYPE_NDJSON,
            bytes,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// `reqwest::blocking` with a keep-alive connection pool
    #[default]
    Reqwest,
    /// `ureq::Agent`
    Ureq,
}

impl TransportKind {
    pub const ALL: [TransportKind; 2] = [TransportKind::Reqwest, TransportKind::Ureq];

    pub fn as_str(self) -> &'static str {
        match self {
            TransportKind::Reqwest => "reqwest",
            TransportKind::Ureq => "ureq",
        }
    }

    pub fn connect(self, options: &TransportOptions) -> Result<Box<dyn Transport>, ClientError> {
        let transport: Box<dyn Transport> = match self {
            TransportKind::Reqwest => Box::new(ReqwestTransport::new(options)?),
            TransportKind::Ureq => Box::new(UreqTransport::new(options)),
        };
        Ok(transport)
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportKind {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reqwest" => Ok(TransportKind::Reqwest),
            "ureq" => Ok(TransportKind::Ureq),
            other => Err(ClientError::InvalidArgument(format!(
                "unknown transport '{}', expected one of: reqwest, ureq",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransportOptions {
    pub timeout: Duration,
    /// Idle keep-alive connections kept per host; 0 reconnects every request.
    pub pool_max_idle: usize,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            pool_max_idle: 16,
        }
    }
}
