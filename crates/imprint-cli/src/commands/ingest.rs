//! Ingest command: Register every novel image under a directory

use std::sync::Arc;

use anyhow::{bail, Result};
use imprint_core::{IngestConfig, IngestSummary, Pipeline};

use super::connect_store;
use crate::types::IngestArgs;

/// Run the ingest command
///
/// # Errors
/// Returns an error if the directory is invalid or the store is unreachable
/// at startup.
pub async fn run(args: &IngestArgs) -> Result<()> {
    // Reject a bad path before touching the network
    if !args.path.is_dir() {
        bail!("directory does not exist: {}", args.path.display());
    }

    let store = connect_store(&args.store).await?;
    let pipeline = Pipeline::new(Arc::new(store), ingest_config(args));

    let summary = pipeline.ingest(&args.path).await?;
    println!("{}", format_summary(&summary));
    if summary.duplicates() > 0 {
        println!(
            "Duplicates logged to {}",
            pipeline.config().ledger_path.display()
        );
    }
    Ok(())
}

/// Translate CLI flags into pipeline configuration
#[must_use]
pub fn ingest_config(args: &IngestArgs) -> IngestConfig {
    let mut config = IngestConfig::default()
        .with_concurrency(args.concurrency)
        .with_ledger_path(&args.ledger)
        .with_progress_bar(args.progress);
    if let Some(path) = &args.failure_ledger {
        config = config.with_failure_ledger(path);
    }
    config
}

/// One-line human summary of a run
#[must_use]
pub fn format_summary(summary: &IngestSummary) -> String {
    format!(
        "{} images: {} registered, {} duplicates, {} failed",
        summary.total,
        summary.registered,
        summary.duplicates(),
        summary.failed()
    )
}
