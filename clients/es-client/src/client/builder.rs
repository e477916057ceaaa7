use super::EsClient;
use crate::protocol::ClientError;
use crate::transport::{TransportKind, TransportOptions};
use std::time::Duration;

pub struct EsClientBuilder {
    addr: String,
    transport: TransportKind,
    options: TransportOptions,
}

impl EsClientBuilder {
    pub fn new(addr: &str) -> Self {
        Self {
            addr: addr.to_string(),
            transport: TransportKind::default(),
            options: TransportOptions::default(),
        }
    }

    pub fn transport(mut self, kind: TransportKind) -> Self {
        self.transport = kind;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    pub fn timeout_ms(self, ms: u64) -> Self {
        self.timeout(Duration::from_millis(ms))
    }

    pub fn pool_max_idle(mut self, size: usize) -> Self {
        self.options.pool_max_idle = size;
        self
    }

    pub fn options(mut self, options: TransportOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> Result<EsClient, ClientError> {
        if !(self.addr.starts_with("http://") || self.addr.starts_with("https://")) {
            return Err(ClientError::InvalidUrl(format!(
                "'{}' must start with http:// or https://",
                self.addr
            )));
        }

        let transport = self.transport.connect(&self.options)?;
        tracing::debug!(url = %self.addr, transport = %self.transport, "client built");
        Ok(EsClient::new(&self.addr, transport))
    }
}
