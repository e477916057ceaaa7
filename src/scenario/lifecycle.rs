use super::Timing;
use crate::config::IndexConfig;
use crate::error::{BenchError, Result};
use crate::timing::measure;
use esbench_client::{Document, EsClient};

pub const STEP_DELETE: &str = "delete index";
pub const STEP_CREATE: &str = "create index";
pub const STEP_IMPORT: &str = "bulk import";
pub const STEP_REFRESH: &str = "refresh";

/// Creates `index` and blocks until it reaches the configured health, so
/// bulk requests never race shard allocation.
pub fn create_and_wait(client: &EsClient, index: &str, config: &IndexConfig) -> Result<()> {
    client.create_index(index, &config.settings())?;
    let health = client.wait_for_health(index, &config.wait_for_status, config.health_timeout())?;
    tracing::debug!(index, status = %health.status, "index ready");
    Ok(())
}

/// Deletes and recreates `index`, bulk loads `docs` with refresh disabled,
/// then refreshes so the documents are searchable.
///
/// The create step includes waiting for the index health.
pub fn index_lifecycle(
    client: &EsClient,
    index: &str,
    docs: &[Document],
    per_page: usize,
    config: &IndexConfig,
) -> Result<Vec<Timing>> {
    let mut timings = Vec::with_capacity(4);

    let (existed, elapsed) = measure(|| client.delete_index(index));
    let existed = existed?;
    tracing::info!(index, existed, "deleted index");
    timings.push(Timing::new(STEP_DELETE, 1, elapsed));

    let (created, elapsed) = measure(|| create_and_wait(client, index, config));
    created?;
    timings.push(Timing::new(STEP_CREATE, 1, elapsed));

    let (summary, elapsed) = measure(|| -> Result<_> {
        client.start_bulk(index)?;
        let summary = client.import(index, docs, per_page)?;
        client.stop_bulk(index, &config.bulk_refresh_interval)?;
        Ok(summary)
    });
    let summary = summary?;
    tracing::info!(
        index,
        documents = summary.documents,
        batches = summary.batches,
        took_ms = summary.took_ms,
        "imported documents"
    );
    if summary.failed > 0 {
        return Err(BenchError::BulkFailures {
            index: index.to_string(),
            failed: summary.failed,
        });
    }
    timings.push(Timing::new(STEP_IMPORT, summary.documents as u64, elapsed));

    let (refreshed, elapsed) = measure(|| client.refresh(index));
    refreshed?;
    timings.push(Timing::new(STEP_REFRESH, 1, elapsed));

    Ok(timings)
}
