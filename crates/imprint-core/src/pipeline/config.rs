//! Ingest configuration

use std::path::PathBuf;
use std::time::Duration;

use crate::hash::CHUNK_SIZE;
use crate::scanner::ImageFormat;

/// Files processed at once unless configured otherwise
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Ledger file used when none is configured
pub const DEFAULT_LEDGER: &str = "duplicates.log";

/// Pause before assuming "not a duplicate" when the store is unreachable
pub const DEFAULT_LOOKUP_BACKOFF: Duration = Duration::from_secs(1);

/// Configuration for an ingest pipeline
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Maximum number of files in flight across the whole run
    pub concurrency: usize,
    /// Where duplicate paths are appended
    pub ledger_path: PathBuf,
    /// Where hash and store failures are appended, if anywhere
    pub failure_ledger_path: Option<PathBuf>,
    pub lookup_backoff: Duration,
    pub chunk_size: usize,
    pub formats: Vec<ImageFormat>,
    /// Draw a terminal progress bar while ingesting
    pub progress_bar: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            ledger_path: PathBuf::from(DEFAULT_LEDGER),
            failure_ledger_path: None,
            lookup_backoff: DEFAULT_LOOKUP_BACKOFF,
            chunk_size: CHUNK_SIZE,
            formats: ImageFormat::ALL.to_vec(),
            progress_bar: false,
        }
    }
}

impl IngestConfig {
    /// Set the concurrency bound (values below 1 are raised to 1)
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Set the duplicate ledger path
    #[must_use]
    pub fn with_ledger_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ledger_path = path.into();
        self
    }

    /// Also append failed paths to a ledger at `path`
    #[must_use]
    pub fn with_failure_ledger(mut self, path: impl Into<PathBuf>) -> Self {
        self.failure_ledger_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_lookup_backoff(mut self, backoff: Duration) -> Self {
        self.lookup_backoff = backoff;
        self
    }

    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Restrict ingestion to specific formats
    #[must_use]
    pub fn with_formats(mut self, formats: Vec<ImageFormat>) -> Self {
        self.formats = formats;
        self
    }

    #[must_use]
    pub fn with_progress_bar(mut self, enabled: bool) -> Self {
        self.progress_bar = enabled;
        self
    }
}
