pub mod cli;
pub mod config;
pub mod docs;
pub mod error;
pub mod logging;
pub mod report;
pub mod scenario;
pub mod timing;

pub use config::BenchConfig;
pub use docs::{Vocabulary, LOREM};
pub use error::{BenchError, Result};
pub use scenario::{ScenarioReport, Timing};
