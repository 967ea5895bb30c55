//! Pipeline module: Bounded, fully-accounted ingestion
//!
//! Every candidate the scanner enumerates ends in exactly one
//! [`FileOutcome`]. Per-file errors stay inside that file's task; only an
//! invalid root directory fails the run as a whole.

mod config;
mod coordinator;
mod oracle;
mod progress;
mod registrar;
mod run;

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

pub use config::{IngestConfig, DEFAULT_CONCURRENCY, DEFAULT_LEDGER, DEFAULT_LOOKUP_BACKOFF};
pub use oracle::{lookup_fallback, DuplicateOracle};
pub use progress::{Progress, Slot};
pub use registrar::{Registrar, RegistrarError, Registration};
pub use run::{FileOutcome, IngestRun, IngestSummary};

use crate::ledger::Ledger;
use crate::scanner::{Candidate, ScanError, Scanner};
use crate::store::RecordStore;
use coordinator::Worker;

/// Errors that abort a whole run
#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Scanner and coordinator wired to one shared record store
///
/// Cloning is cheap and clones share the store handle and ledgers, so a
/// clone can be moved into a spawned task.
#[derive(Clone)]
pub struct Pipeline {
    config: Arc<IngestConfig>,
    worker: Arc<Worker>,
}

impl Pipeline {
    /// Build a pipeline around a store handle
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>, config: IngestConfig) -> Self {
        let duplicates = Arc::new(Ledger::new(&config.ledger_path));
        let failures = config
            .failure_ledger_path
            .as_ref()
            .map(|path| Arc::new(Ledger::new(path)));

        let worker = Worker {
            oracle: DuplicateOracle::new(Arc::clone(&store), config.lookup_backoff),
            registrar: Registrar::new(store, Arc::clone(&duplicates)),
            duplicates,
            failures,
            chunk_size: config.chunk_size,
        };

        Self {
            config: Arc::new(config),
            worker: Arc::new(worker),
        }
    }

    #[must_use]
    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Scan `root` and ingest every candidate to completion
    ///
    /// # Errors
    /// Returns `IngestError::Scan` if `root` is missing or not a directory.
    /// Nothing is processed in that case.
    pub async fn ingest(&self, root: impl AsRef<Path>) -> Result<IngestSummary, IngestError> {
        let root = root.as_ref();
        info!("Ingesting directory: {}", root.display());

        let candidates = Scanner::new(root)
            .with_formats(self.config.formats.clone())
            .scan()?;
        info!("Found {} images to process", candidates.len());

        let run = IngestRun::new(root.display().to_string());
        let progress = Arc::new(Progress::new(candidates.len(), self.config.progress_bar));
        let summary = self.process(run, candidates, progress).await;

        log_summary(&summary);
        Ok(summary)
    }

    /// Ingest an already-enumerated candidate list
    pub async fn process(
        &self,
        run: IngestRun,
        candidates: Vec<Candidate>,
        progress: Arc<Progress>,
    ) -> IngestSummary {
        let mut summary = IngestSummary::new(run, candidates.len());

        let outcomes = coordinator::run_all(
            Arc::clone(&self.worker),
            candidates,
            self.config.concurrency,
            Arc::clone(&progress),
        )
        .await;
        progress.finish();

        for outcome in outcomes {
            summary.tally(outcome);
        }
        summary.run = summary.run.finished();
        summary
    }
}

fn log_summary(summary: &IngestSummary) {
    info!(
        "✓ Ingest {} completed: {} registered, {} duplicates ({} late), {} failed",
        summary.run.id,
        summary.registered,
        summary.duplicates(),
        summary.late_duplicates,
        summary.failed()
    );
}

#[cfg(test)]
mod tests;
