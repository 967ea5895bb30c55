//! Coordinator: drives each candidate through hash, check and register

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use super::oracle::DuplicateOracle;
use super::progress::Progress;
use super::registrar::{Registrar, RegistrarError, Registration};
use super::run::FileOutcome;
use crate::hash::fingerprint_chunked;
use crate::ledger::Ledger;
use crate::scanner::Candidate;

/// Per-file work shared by every task of a pipeline
pub(crate) struct Worker {
    pub(crate) oracle: DuplicateOracle,
    pub(crate) registrar: Registrar,
    pub(crate) duplicates: Arc<Ledger>,
    pub(crate) failures: Option<Arc<Ledger>>,
    pub(crate) chunk_size: usize,
}

impl Worker {
    /// Run one file to a terminal state
    pub(crate) async fn process(&self, path: &Path) -> FileOutcome {
        let outcome = self.classify(path).await;
        if outcome.is_failure() {
            self.record_failure(path).await;
        }
        outcome
    }

    async fn classify(&self, path: &Path) -> FileOutcome {
        let fingerprint = match fingerprint_chunked(path, self.chunk_size).await {
            Ok(fingerprint) => fingerprint,
            Err(e) => {
                warn!("{}", e);
                return FileOutcome::HashFailed;
            }
        };

        match self.oracle.exists(&fingerprint).await {
            Ok(true) => {
                debug!("Known duplicate: {}", path.display());
                if let Err(e) = self.duplicates.record(path).await {
                    warn!("{}", e);
                }
                FileOutcome::KnownDuplicate
            }
            Ok(false) => self.register(path, &fingerprint).await,
            Err(e) => {
                warn!("Duplicate check failed for {}: {}", path.display(), e);
                FileOutcome::StoreFailed
            }
        }
    }

    async fn register(&self, path: &Path, fingerprint: &crate::hash::Fingerprint) -> FileOutcome {
        match self.registrar.register(path, fingerprint).await {
            Ok(Registration::Registered) => {
                debug!("Registered {} ({})", path.display(), fingerprint);
                FileOutcome::Registered
            }
            Ok(Registration::LateDuplicate) => FileOutcome::LateDuplicate,
            // The store already decided; only the audit line was lost
            Err(RegistrarError::Ledger(e)) => {
                warn!("{}", e);
                FileOutcome::LateDuplicate
            }
            Err(RegistrarError::Store(e)) => {
                warn!("Insert failed for {}: {}", path.display(), e);
                FileOutcome::StoreFailed
            }
            Err(e @ RegistrarError::NonUtf8Path(_)) => {
                warn!("{}", e);
                FileOutcome::StoreFailed
            }
        }
    }

    pub(crate) async fn record_failure(&self, path: &Path) {
        if let Some(ledger) = &self.failures {
            if let Err(e) = ledger.record(path).await {
                warn!("{}", e);
            }
        }
    }
}

/// Fan out one task per candidate, at most `concurrency` in flight
///
/// Returns one outcome per candidate. A task that panics is reported as
/// `Aborted`; its slot is still released and its progress still counted.
pub(crate) async fn run_all(
    worker: Arc<Worker>,
    candidates: Vec<Candidate>,
    concurrency: usize,
    progress: Arc<Progress>,
) -> Vec<FileOutcome> {
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));

    let (paths, handles): (Vec<PathBuf>, Vec<_>) = candidates
        .into_iter()
        .map(|candidate| {
            let worker = Arc::clone(&worker);
            let semaphore = Arc::clone(&semaphore);
            let mut slot = progress.enter();
            let path = candidate.path;
            let task_path = path.clone();

            let handle = tokio::spawn(async move {
                match semaphore.acquire_owned().await {
                    Ok(permit) => slot.hold(permit),
                    Err(_) => return FileOutcome::Aborted,
                }
                worker.process(&task_path).await
            });
            (path, handle)
        })
        .unzip();

    let results = join_all(handles).await;

    let mut outcomes = Vec::with_capacity(results.len());
    for (path, result) in paths.iter().zip(results) {
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Worker for {} aborted: {}", path.display(), e);
                worker.record_failure(path).await;
                FileOutcome::Aborted
            }
        };
        outcomes.push(outcome);
    }
    outcomes
}
