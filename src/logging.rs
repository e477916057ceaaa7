use crate::error::{BenchError, Result};
use clap::ValueEnum;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

pub fn default_directives(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "esbench=info,esbench_client=info",
        1 => "esbench=debug,esbench_client=debug",
        _ => "esbench=trace,esbench_client=trace",
    }
}

/// Installs the global subscriber. Logs go to stderr; `RUST_LOG` wins over
/// the verbosity flag.
pub fn init(verbosity: u8, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    }
    .map_err(|e| BenchError::Logging(e.to_string()))
}
