//! Append-only ledger of paths
//!
//! Each entry is one path followed by a newline. Appends from concurrent
//! workers are serialized so lines never interleave. The file is reopened
//! for every append, so it is created if absent (including after being
//! removed or rotated away between runs) and never truncated. Paths that
//! are not valid UTF-8 or that contain a line break cannot be written as
//! one line and are rejected.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Errors that can occur while appending to a ledger
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Failed to append to ledger {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Path cannot be written as a ledger line: {}", .0.display())]
    Unrepresentable(PathBuf),
}

/// Shared append-only log, one path per line
#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    lock: Mutex<()>,
}

impl Ledger {
    /// Create a ledger writing to `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Append `entry` as a single line
    ///
    /// # Errors
    /// Returns an error if `entry` cannot be written as one line, or if the
    /// ledger file cannot be opened or written.
    pub async fn record(&self, entry: &Path) -> Result<(), LedgerError> {
        let line = entry_line(entry)?;
        let io_err = |source| LedgerError::Io {
            path: self.path.clone(),
            source,
        };

        // Held across open, write and flush so a line is written whole
        let _guard = self.lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(io_err)?;
        file.write_all(line.as_bytes()).await.map_err(io_err)?;
        file.flush().await.map_err(io_err)?;

        Ok(())
    }

    /// Path of the underlying log file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn entry_line(entry: &Path) -> Result<String, LedgerError> {
    match entry.to_str() {
        Some(text) if !text.contains(['\n', '\r']) => Ok(format!("{text}\n")),
        _ => Err(LedgerError::Unrepresentable(entry.to_path_buf())),
    }
}
