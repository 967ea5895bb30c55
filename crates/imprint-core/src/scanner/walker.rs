//! File walker: Enumerates candidate images in a directory tree

use std::path::PathBuf;

use thiserror::Error;
use walkdir::WalkDir;

use super::ImageFormat;

/// Errors raised before any candidate is produced
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Invalid directory: {}", .0.display())]
    InvalidDirectory(PathBuf),
}

/// A file discovered during scanning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub format: ImageFormat,
}

/// Scanner for discovering image files in a directory
#[derive(Debug)]
pub struct Scanner {
    root: PathBuf,
    formats: Vec<ImageFormat>,
}

impl Scanner {
    /// Create a new scanner for the given root directory
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            formats: ImageFormat::ALL.to_vec(),
        }
    }

    /// Filter to only scan specific formats
    #[must_use]
    pub fn with_formats(mut self, formats: Vec<ImageFormat>) -> Self {
        self.formats = formats;
        self
    }

    /// Walk the whole tree and collect every candidate up front
    ///
    /// Entries that cannot be read (permission denied, vanished mid-walk)
    /// are skipped. Results are sorted by path.
    ///
    /// # Errors
    /// Returns `ScanError::InvalidDirectory` if the root is missing or is
    /// not a directory.
    pub fn scan(&self) -> Result<Vec<Candidate>, ScanError> {
        if !self.root.is_dir() {
            return Err(ScanError::InvalidDirectory(self.root.clone()));
        }

        let mut candidates: Vec<Candidate> = WalkDir::new(&self.root)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                let path = entry.into_path();
                ImageFormat::from_path(&path)
                    .filter(|format| self.formats.contains(format))
                    .map(|format| Candidate { path, format })
            })
            .collect();

        candidates.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(candidates)
    }
}
