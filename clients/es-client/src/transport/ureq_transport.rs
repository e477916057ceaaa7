use super::{Method, RawResponse, RequestBody, Transport, TransportKind, TransportOptions};
use crate::protocol::ClientError;
use ureq::Agent;

pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new(options: &TransportOptions) -> Self {
        // Status codes are interpreted by the client, not the agent.
        let config = Agent::config_builder()
            .timeout_global(Some(options.timeout))
            .max_idle_connections_per_host(options.pool_max_idle)
            .http_status_as_error(false)
            .build();

        Self {
            agent: Agent::new_with_config(config),
        }
    }
}

impl Transport for UreqTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Ureq
    }

    fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<RequestBody>,
    ) -> Result<RawResponse, ClientError> {
        let result = match (method, body) {
            (Method::Get, _) => self.agent.get(url).call(),
            (Method::Head, _) => self.agent.head(url).call(),
            (Method::Delete, _) => self.agent.delete(url).call(),
            (Method::Post, Some(body)) => self
                .agent
                .post(url)
                .header("Content-Type", body.content_type)
                .send(&body.bytes[..]),
            (Method::Post, None) => self.agent.post(url).send_empty(),
            (Method::Put, Some(body)) => self
                .agent
                .put(url)
                .header("Content-Type", body.content_type)
                .send(&body.bytes[..]),
            (Method::Put, None) => self.agent.put(url).send_empty(),
        };

        let mut response =
            result.map_err(|e| ClientError::Connection(format!("HTTP request failed: {}", e)))?;

        let status = response.status().as_u16();
        let body = if method == Method::Head {
            String::new()
        } else {
            // ureq caps bodies at 10 MB by default; bulk responses can be larger.
            response
                .body_mut()
                .with_config()
                .limit(u64::MAX)
                .read_to_string()
                .map_err(|e| ClientError::Protocol(format!("Failed to read response: {}", e)))?
        };

        Ok(RawResponse { status, body })
    }
}
