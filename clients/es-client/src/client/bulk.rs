use super::{check_status, decode, EsClient};
use crate::protocol::{BulkResponse, ClientError, Document};
use crate::transport::{Method, RequestBody};
use serde_json::json;

const BULK_PATH: &str = "/_bulk";

/// Totals over all bulk requests of one import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub batches: usize,
    pub documents: usize,
    /// Sum of server-side `took` over all batches, in milliseconds.
    pub took_ms: u64,
    pub failed: usize,
}

/// Appends the NDJSON action and source lines for one document.
fn encode_into(buf: &mut Vec<u8>, index: &str, doc: &Document) -> Result<(), ClientError> {
    let action = json!({"index": {"_index": index, "_id": doc.id.to_string()}});
    serde_json::to_writer(&mut *buf, &action)?;
    buf.push(b'\n');
    serde_json::to_writer(&mut *buf, &doc.source)?;
    buf.push(b'\n');
    Ok(())
}

/// Encodes documents as a `_bulk` request body.
pub fn encode_bulk(index: &str, docs: &[Document]) -> Result<Vec<u8>, ClientError> {
    let mut buf = Vec::with_capacity(docs.len() * 256);
    for doc in docs {
        encode_into(&mut buf, index, doc)?;
    }
    Ok(buf)
}

impl EsClient {
    /// Posts an already encoded NDJSON body to `_bulk`.
    pub fn bulk_raw(&self, body: Vec<u8>) -> Result<BulkResponse, ClientError> {
        let response = self.send(Method::Post, BULK_PATH, Some(RequestBody::ndjson(body)))?;
        let response = check_status(Method::Post, BULK_PATH, response)?;
        let bulk: BulkResponse = decode(BULK_PATH, &response.body)?;
        if bulk.errors {
            tracing::warn!(failed = bulk.failed_items(), "bulk request had item failures");
        }
        Ok(bulk)
    }

    /// Indexes all documents in one bulk request. An empty slice sends nothing.
    pub fn bulk(&self, index: &str, docs: &[Document]) -> Result<BulkResponse, ClientError> {
        if docs.is_empty() {
            return Ok(BulkResponse::default());
        }
        self.bulk_raw(encode_bulk(index, docs)?)
    }

    /// Indexes documents in bulk requests of at most `per_page` documents.
    pub fn import(
        &self,
        index: &str,
        docs: &[Document],
        per_page: usize,
    ) -> Result<ImportSummary, ClientError> {
        if per_page == 0 {
            return Err(ClientError::InvalidArgument(
                "per_page must be at least 1".to_string(),
            ));
        }

        let mut summary = ImportSummary::default();
        for chunk in docs.chunks(per_page) {
            let response = self.bulk(index, chunk)?;
            summary.batches += 1;
            summary.documents += chunk.len();
            summary.took_ms += response.took;
            summary.failed += response.failed_items();
        }

        tracing::debug!(
            index,
            batches = summary.batches,
            documents = summary.documents,
            took_ms = summary.took_ms,
            "import finished"
        );
        Ok(summary)
    }
}

/// Result of a flush: how many documents went out and what the server said.
#[derive(Debug, Clone)]
pub struct BulkFlush {
    pub actions: usize,
    pub response: BulkResponse,
}

/// Buffers documents for one index and sends them once either limit is hit.
pub struct BulkBuffer {
    index: String,
    max_actions: usize,
    max_volume: usize,
    pending: Vec<u8>,
    actions: usize,
}

impl BulkBuffer {
    pub const DEFAULT_MAX_ACTIONS: usize = 1000;
    pub const DEFAULT_MAX_VOLUME: usize = 10 * 1024 * 1024;

    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            max_actions: Self::DEFAULT_MAX_ACTIONS,
            max_volume: Self::DEFAULT_MAX_VOLUME,
            pending: Vec::new(),
            actions: 0,
        }
    }

    pub fn max_actions(mut self, max_actions: usize) -> Self {
        self.max_actions = max_actions.max(1);
        self
    }

    pub fn max_volume(mut self, bytes: usize) -> Self {
        self.max_volume = bytes.max(1);
        self
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    /// Documents buffered and not yet sent.
    pub fn pending(&self) -> usize {
        self.actions
    }

    pub fn pending_bytes(&self) -> usize {
        self.pending.len()
    }

    pub fn push(
        &mut self,
        client: &EsClient,
        doc: &Document,
    ) -> Result<Option<BulkFlush>, ClientError> {
        encode_into(&mut self.pending, &self.index, doc)?;
        self.actions += 1;

        if self.actions >= self.max_actions || self.pending.len() >= self.max_volume {
            return self.flush(client);
        }
        Ok(None)
    }

    pub fn flush(&mut self, client: &EsClient) -> Result<Option<BulkFlush>, ClientError> {
        if self.actions == 0 {
            return Ok(None);
        }

        let body = std::mem::take(&mut self.pending);
        let actions = std::mem::replace(&mut self.actions, 0);
        let response = client.bulk_raw(body)?;
        Ok(Some(BulkFlush { actions, response }))
    }
}
