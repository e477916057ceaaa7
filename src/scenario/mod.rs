//! Benchmark scenarios.
//!
//! Every scenario is a straight line of blocking client calls with a timer
//! around each step. Nothing is retried: the first error ends the run.

pub mod compare;
pub mod import;
pub mod ingest;
pub mod lifecycle;
pub mod search;

pub use compare::CompareOptions;
pub use import::ImportOptions;
pub use ingest::{IngestOptions, IngestRow, IngestSummary};
pub use lifecycle::index_lifecycle;
pub use search::{search_workload, LETTERS};

use esbench_client::TransportKind;
use std::time::Duration;

/// One timed step of a scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct Timing {
    pub step: String,
    /// Requests or documents handled by the step
    pub count: u64,
    pub elapsed: Duration,
}

impl Timing {
    pub fn new(step: impl Into<String>, count: u64, elapsed: Duration) -> Self {
        Self {
            step: step.into(),
            count,
            elapsed,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub scenario: String,
    pub transport: TransportKind,
    pub timings: Vec<Timing>,
    /// Wall-clock time around the whole scenario
    pub total: Duration,
}

impl ScenarioReport {
    pub fn timing(&self, step: &str) -> Option<&Timing> {
        self.timings.iter().find(|t| t.step == step)
    }
}
