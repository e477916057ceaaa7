//! Continuous buffered bulk ingest.
//!
//! Documents are pushed one at a time into a [`BulkBuffer`]; every flush
//! produces one CSV row with server-side `took`, overall throughput and the
//! throughput since the previous flush. A flush with rejected items ends the
//! run before its row is written.

use super::lifecycle::create_and_wait;
use crate::config::IndexConfig;
use crate::docs::{self, Vocabulary};
use crate::error::{BenchError, Result};
use crate::timing::{IntervalSample, Meter};
use chrono::{SecondsFormat, Utc};
use esbench_client::{BulkBuffer, BulkFlush, EsClient};
use indicatif::ProgressBar;
use rand::Rng;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone)]
pub struct IngestOptions {
    pub start: u64,
    pub total: u64,
    pub bulk_size: usize,
    pub index: String,
}

pub const DEFAULT_START: u64 = 1;
pub const DEFAULT_TOTAL: u64 = 1_000_000;
pub const DEFAULT_BULK_SIZE: usize = 1000;
pub const DEFAULT_INDEX: &str = "pyindex";

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            start: DEFAULT_START,
            total: DEFAULT_TOTAL,
            bulk_size: DEFAULT_BULK_SIZE,
            index: DEFAULT_INDEX.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IngestRow {
    pub timestamp: String,
    pub took: u64,
    pub total_docs: u64,
    pub total_secs: f64,
    pub total_rate: f64,
    pub interval_docs: u64,
    pub interval_secs: f64,
    pub interval_rate: f64,
}

impl IngestRow {
    fn new(took: u64, sample: &IntervalSample) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            took,
            total_docs: sample.total_docs,
            total_secs: sample.total_elapsed.as_secs_f64(),
            total_rate: sample.total_rate(),
            interval_docs: sample.interval_docs,
            interval_secs: sample.interval_elapsed.as_secs_f64(),
            interval_rate: sample.interval_rate(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestSummary {
    pub documents: u64,
    pub flushes: u64,
    pub took_ms: u64,
}

struct Ingest<'a, W: Write> {
    index: &'a str,
    meter: Meter,
    writer: &'a mut csv::Writer<W>,
    summary: IngestSummary,
}

impl<W: Write> Ingest<'_, W> {
    fn on_flush(&mut self, flush: BulkFlush) -> Result<()> {
        let failed = flush.response.failed_items();
        if failed > 0 {
            return Err(BenchError::BulkFailures {
                index: self.index.to_string(),
                failed,
            });
        }

        self.meter.record(flush.actions as u64);
        let sample = self.meter.mark();
        self.writer.serialize(IngestRow::new(flush.response.took, &sample))?;
        self.writer.flush()?;

        self.summary.documents += flush.actions as u64;
        self.summary.flushes += 1;
        self.summary.took_ms += flush.response.took;
        Ok(())
    }
}

/// Indexes `options.total` documents with ids starting at `options.start`.
///
/// The index is created if missing but never deleted, so a run can resume
/// from a later start id.
pub fn run<W: Write, R: Rng + ?Sized>(
    client: &EsClient,
    options: &IngestOptions,
    config: &IndexConfig,
    vocabulary: &Vocabulary,
    rng: &mut R,
    writer: &mut csv::Writer<W>,
    progress: Option<&ProgressBar>,
) -> Result<IngestSummary> {
    if options.bulk_size == 0 {
        return Err(BenchError::InvalidArgument(
            "bulk size must be at least 1".to_string(),
        ));
    }

    if !client.index_exists(&options.index)? {
        create_and_wait(client, &options.index, config)?;
        tracing::info!(index = %options.index, "created index");
    }

    let mut buffer = BulkBuffer::new(options.index.as_str()).max_actions(options.bulk_size);
    let mut ingest = Ingest {
        index: &options.index,
        meter: Meter::start(),
        writer,
        summary: IngestSummary::default(),
    };

    let end = options.start.saturating_add(options.total);
    for id in options.start..end {
        let doc = docs::lettered_one(id, vocabulary, rng);
        if let Some(flush) = buffer.push(client, &doc)? {
            let actions = flush.actions as u64;
            ingest.on_flush(flush)?;
            if let Some(pb) = progress {
                pb.inc(actions);
            }
        }
    }
    if let Some(flush) = buffer.flush(client)? {
        let actions = flush.actions as u64;
        ingest.on_flush(flush)?;
        if let Some(pb) = progress {
            pb.inc(actions);
        }
    }

    let summary = ingest.summary;
    tracing::info!(
        index = %options.index,
        documents = summary.documents,
        flushes = summary.flushes,
        took_ms = summary.took_ms,
        "ingest finished"
    );
    Ok(summary)
}
