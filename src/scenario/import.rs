use super::{index_lifecycle, ScenarioReport};
use crate::config::BenchConfig;
use crate::docs::{self, Vocabulary};
use crate::error::Result;
use crate::timing::measure;
use esbench_client::TransportKind;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub const SCENARIO: &str = "import";

pub const DEFAULT_DOCS: u64 = 10_000;
pub const DEFAULT_PER_PAGE: usize = 100;
pub const DEFAULT_INDEX: &str = "rubybench";

#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub transport: TransportKind,
    pub docs: u64,
    pub per_page: usize,
    pub index: String,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            transport: TransportKind::default(),
            docs: DEFAULT_DOCS,
            per_page: DEFAULT_PER_PAGE,
            index: DEFAULT_INDEX.to_string(),
        }
    }
}

pub fn rng_for(config: &BenchConfig) -> StdRng {
    match config.data.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Bulk loads documents with 26 random-word fields into a fresh index.
///
/// Like `compare`, the timed block includes building the client.
pub fn run(config: &BenchConfig, options: &ImportOptions) -> Result<ScenarioReport> {
    let mut rng = rng_for(config);
    let vocabulary = Vocabulary::generate(config.data.words, config.data.word_len, &mut rng);
    let documents = docs::lettered(1..=options.docs, &vocabulary, &mut rng);
    tracing::debug!(
        documents = documents.len(),
        words = vocabulary.words().len(),
        "generated documents"
    );

    let (timings, total) = measure(|| -> Result<_> {
        let client = config.client(options.transport)?;
        index_lifecycle(
            &client,
            &options.index,
            &documents,
            options.per_page,
            &config.index,
        )
    });

    Ok(ScenarioReport {
        scenario: SCENARIO.to_string(),
        transport: options.transport,
        timings: timings?,
        total,
    })
}
