use super::{Method, RawResponse, RequestBody, Transport, TransportKind, TransportOptions};
use crate::protocol::ClientError;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(options: &TransportOptions) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(options.timeout)
            .pool_max_idle_per_host(options.pool_max_idle)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| ClientError::Connection(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Head => reqwest::Method::HEAD,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

impl Transport for ReqwestTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Reqwest
    }

    fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<RequestBody>,
    ) -> Result<RawResponse, ClientError> {
        let mut request = self.client.request(to_reqwest(method), url);
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, body.content_type).body(body.bytes);
        }

        let response = request
            .send()
            .map_err(|e| ClientError::Connection(format!("HTTP request failed: {}", e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| ClientError::Protocol(format!("Failed to read response: {}", e)))?;

        Ok(RawResponse { status, body })
    }
}
