use clap::Parser;
use esbench::cli::{self, Cli};
use esbench::logging;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.log_format)?;
    tracing::debug!(command = ?cli.command, "starting");

    let stdout = std::io::stdout();
    cli::run(cli, &mut stdout.lock())?;
    Ok(())
}
