//! Ingest run metadata and summary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Terminal state of one candidate file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileOutcome {
    /// A new record was created
    Registered,
    /// The pre-insert lookup found the fingerprint
    KnownDuplicate,
    /// The lookup passed but the insert hit a uniqueness conflict
    LateDuplicate,
    /// The file could not be read
    HashFailed,
    /// The store rejected a lookup or insert for a reason other than a conflict
    StoreFailed,
    /// The worker died before reaching another terminal state
    Aborted,
}

impl FileOutcome {
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::KnownDuplicate | Self::LateDuplicate)
    }

    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::HashFailed | Self::StoreFailed | Self::Aborted)
    }
}

/// One pass of the pipeline over a directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestRun {
    /// Unique identifier for this run
    pub id: String,
    /// Directory being ingested
    pub root: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl IngestRun {
    /// Create a new run starting now
    #[must_use]
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            root: root.into(),
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Mark the run finished now
    #[must_use]
    pub fn finished(mut self) -> Self {
        self.finished_at = Some(Utc::now());
        self
    }
}

/// Aggregate counts for a completed run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestSummary {
    pub run: IngestRun,
    /// Candidates enumerated by the scanner
    pub total: usize,
    pub registered: usize,
    pub known_duplicates: usize,
    pub late_duplicates: usize,
    pub hash_failed: usize,
    pub store_failed: usize,
    pub aborted: usize,
}

impl IngestSummary {
    /// Empty summary for a run over `total` candidates
    #[must_use]
    pub fn new(run: IngestRun, total: usize) -> Self {
        Self {
            run,
            total,
            registered: 0,
            known_duplicates: 0,
            late_duplicates: 0,
            hash_failed: 0,
            store_failed: 0,
            aborted: 0,
        }
    }

    /// Count one finalized file
    pub fn tally(&mut self, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Registered => self.registered += 1,
            FileOutcome::KnownDuplicate => self.known_duplicates += 1,
            FileOutcome::LateDuplicate => self.late_duplicates += 1,
            FileOutcome::HashFailed => self.hash_failed += 1,
            FileOutcome::StoreFailed => self.store_failed += 1,
            FileOutcome::Aborted => self.aborted += 1,
        }
    }

    /// Early and late duplicates together
    #[must_use]
    pub fn duplicates(&self) -> usize {
        self.known_duplicates + self.late_duplicates
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.hash_failed + self.store_failed + self.aborted
    }

    /// Files with a finalized outcome; equals `total` after a run
    #[must_use]
    pub fn accounted(&self) -> usize {
        self.registered + self.duplicates() + self.failed()
    }
}
