//! imprint: CLI for content-addressed image ingestion

use clap::Parser;
use imprint_cli::commands;
use imprint_cli::logging::setup_logging;
use imprint_cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Ingest(args) => {
            commands::ingest::run(&args).await?;
        }
        Commands::Label(args) => {
            commands::label::run(&args).await?;
        }
    }

    Ok(())
}
