use crate::config::BenchConfig;
use crate::docs::Vocabulary;
use crate::error::Result;
use crate::logging::LogFormat;
use crate::report;
use crate::scenario::{
    self, compare, import, ingest, CompareOptions, ImportOptions, IngestOptions,
};
use clap::{ArgAction, Args, Parser, Subcommand};
use colored::*;
use esbench_client::TransportKind;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "esbench", version)]
#[command(
    about = "Times Elasticsearch indexing and searches over different HTTP clients",
    long_about = None
)]
pub struct Cli {
    /// Elasticsearch base URL
    #[arg(long, env = "ES_URL", global = true)]
    pub url: Option<String>,

    /// TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Import and search the same documents once per HTTP client
    Compare(CompareArgs),
    /// Time a bulk import of random-word documents over one HTTP client
    Import(ImportArgs),
    /// Stream buffered bulk requests and print one CSV row per flush
    Ingest(IngestArgs),
    /// Print cluster name and version
    Ping {
        #[arg(short, long, default_value_t = TransportKind::Reqwest)]
        transport: TransportKind,
    },
}

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// HTTP clients to compare, in run order
    #[arg(short, long = "transport", default_values_t = TransportKind::ALL)]
    pub transports: Vec<TransportKind>,

    #[arg(long, default_value_t = compare::DEFAULT_DOCS)]
    pub docs: u64,

    /// Documents per bulk request
    #[arg(long, default_value_t = compare::DEFAULT_PER_PAGE)]
    pub per_page: usize,

    /// Passes over the a..z letter searches
    #[arg(long, default_value_t = compare::DEFAULT_ROUNDS)]
    pub rounds: usize,

    /// Index name prefix
    #[arg(long, default_value = compare::DEFAULT_INDEX)]
    pub index: String,

    /// Also write timings to this CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    #[arg(short, long, default_value_t = TransportKind::Reqwest)]
    pub transport: TransportKind,

    #[arg(long, default_value_t = import::DEFAULT_DOCS)]
    pub docs: u64,

    #[arg(long, default_value_t = import::DEFAULT_PER_PAGE)]
    pub per_page: usize,

    /// Vocabulary size for field values
    #[arg(long)]
    pub words: Option<usize>,

    /// RNG seed for reproducible documents
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value = import::DEFAULT_INDEX)]
    pub index: String,

    #[arg(long)]
    pub csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct IngestArgs {
    #[arg(short, long, default_value_t = TransportKind::Reqwest)]
    pub transport: TransportKind,

    /// First document id
    #[arg(long, default_value_t = ingest::DEFAULT_START)]
    pub start: u64,

    #[arg(long, default_value_t = ingest::DEFAULT_TOTAL)]
    pub total: u64,

    /// Documents per bulk request
    #[arg(long, default_value_t = ingest::DEFAULT_BULK_SIZE)]
    pub bulk_size: usize,

    #[arg(long, default_value = ingest::DEFAULT_INDEX)]
    pub index: String,

    /// CSV output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Hide the progress bar
    #[arg(long)]
    pub quiet: bool,
}

impl Cli {
    pub fn settings(&self) -> Result<BenchConfig> {
        Ok(BenchConfig::load(self.config.as_deref())?
            .with_url(self.url.clone())
            .with_timeout(self.timeout))
    }
}

/// Runs the selected command, writing timing output to `out`.
pub fn run<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    let mut config = cli.settings()?;
    tracing::debug!(url = %config.server.url, "configuration loaded");

    match cli.command {
        Command::Compare(args) => {
            let options = CompareOptions {
                transports: args.transports,
                docs: args.docs,
                per_page: args.per_page,
                rounds: args.rounds,
                index: args.index,
            };
            let reports = scenario::compare::run(&config, &options)?;
            report::print_comparison(out, &reports)?;
            if let Some(path) = args.csv {
                report::write_csv(&path, &reports)?;
            }
        }
        Command::Import(args) => {
            if let Some(words) = args.words {
                config.data.words = words;
            }
            if args.seed.is_some() {
                config.data.seed = args.seed;
            }
            let options = ImportOptions {
                transport: args.transport,
                docs: args.docs,
                per_page: args.per_page,
                index: args.index,
            };
            let result = scenario::import::run(&config, &options)?;
            report::print_report(out, &result)?;
            report::print_tuple(out, "Benchmark", result.total.as_secs_f64())?;
            report::print_separator(out)?;
            if let Some(path) = args.csv {
                report::write_csv(&path, std::slice::from_ref(&result))?;
            }
        }
        Command::Ingest(args) => {
            if args.seed.is_some() {
                config.data.seed = args.seed;
            }
            run_ingest(&config, args, out)?;
        }
        Command::Ping { transport } => {
            let client = config.client(transport)?;
            let info = client.info()?;
            writeln!(
                out,
                "{} {} ({}) version {}",
                "✓".green(),
                info.cluster_name.cyan(),
                info.name,
                info.version.number
            )?;
        }
    }

    Ok(())
}

const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec}, {eta})";

fn run_ingest<W: Write>(config: &BenchConfig, args: IngestArgs, out: &mut W) -> Result<()> {
    let options = IngestOptions {
        start: args.start,
        total: args.total,
        bulk_size: args.bulk_size,
        index: args.index,
    };

    let mut rng = scenario::import::rng_for(config);
    let vocabulary = Vocabulary::generate(config.data.words, config.data.word_len, &mut rng);
    let client = config.client(args.transport)?;

    let output: Box<dyn Write + '_> = match &args.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(out),
    };
    let mut writer = csv::Writer::from_writer(output);

    let progress = if args.quiet {
        None
    } else {
        let pb = ProgressBar::new(options.total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(PROGRESS_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Some(pb)
    };

    let summary = scenario::ingest::run(
        &client,
        &options,
        &config.index,
        &vocabulary,
        &mut rng,
        &mut writer,
        progress.as_ref(),
    )?;

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    eprintln!(
        "{} {} documents in {} bulk requests",
        "✓".green(),
        summary.documents.to_string().green(),
        summary.flushes
    );
    if let Some(path) = &args.output {
        eprintln!("✓ Rows written to {}", path.display());
    }
    Ok(())
}
