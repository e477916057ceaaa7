use super::{index_lifecycle, search_workload, ScenarioReport};
use crate::config::BenchConfig;
use crate::docs::{self, LOREM};
use crate::error::{BenchError, Result};
use crate::timing::measure;
use esbench_client::TransportKind;

pub const SCENARIO: &str = "compare";

pub const DEFAULT_DOCS: u64 = 10_000;
pub const DEFAULT_PER_PAGE: usize = 1000;
pub const DEFAULT_ROUNDS: usize = 1000;
pub const DEFAULT_INDEX: &str = "import";

#[derive(Debug, Clone)]
pub struct CompareOptions {
    pub transports: Vec<TransportKind>,
    pub docs: u64,
    pub per_page: usize,
    pub rounds: usize,
    /// Index name prefix; each transport gets `{index}-{transport}`
    pub index: String,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            transports: TransportKind::ALL.to_vec(),
            docs: DEFAULT_DOCS,
            per_page: DEFAULT_PER_PAGE,
            rounds: DEFAULT_ROUNDS,
            index: DEFAULT_INDEX.to_string(),
        }
    }
}

/// Runs the same import and search workload once per transport.
///
/// Client construction is part of the timed block.
pub fn run(config: &BenchConfig, options: &CompareOptions) -> Result<Vec<ScenarioReport>> {
    if options.transports.is_empty() {
        return Err(BenchError::InvalidArgument(
            "at least one transport is required".to_string(),
        ));
    }

    let documents = docs::titled(1..=options.docs, LOREM);
    let mut reports = Vec::with_capacity(options.transports.len());

    for &transport in &options.transports {
        let index = format!("{}-{}", options.index, transport);
        tracing::info!(%transport, index = %index, "starting run");

        let (timings, total) = measure(|| -> Result<_> {
            let client = config.client(transport)?;
            let mut timings =
                index_lifecycle(&client, &index, &documents, options.per_page, &config.index)?;
            timings.extend(search_workload(&client, &index, options.rounds)?);
            Ok(timings)
        });

        reports.push(ScenarioReport {
            scenario: SCENARIO.to_string(),
            transport,
            timings: timings?,
            total,
        });
    }

    Ok(reports)
}

/// Fastest and slowest report by total time, when there are at least two.
pub fn spread(reports: &[ScenarioReport]) -> Option<(&ScenarioReport, &ScenarioReport)> {
    if reports.len() < 2 {
        return None;
    }
    let fastest = reports.iter().min_by_key(|r| r.total)?;
    let slowest = reports.iter().max_by_key(|r| r.total)?;
    Some((fastest, slowest))
}
