//! Content fingerprinting
//!
//! A fingerprint is the SHA-256 digest of a file's full byte stream,
//! rendered as 64 lowercase hex characters. It is the dedup key.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

/// Bytes read per chunk while hashing
pub const CHUNK_SIZE: usize = 8 * 1024;

/// Errors that can occur while fingerprinting a file
#[derive(Debug, Error)]
pub enum HashError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Hex-encoded SHA-256 digest of a file's content
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Digest length in hex characters
    pub const HEX_LEN: usize = 64;

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wrap an already-computed hex digest
    ///
    /// Returns `None` unless `hex` is exactly 64 lowercase hex characters.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let valid = hex.len() == Self::HEX_LEN
            && hex
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c));
        valid.then(|| Self(hex.to_string()))
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fingerprint a file using the default chunk size
///
/// # Errors
/// Returns `HashError::Io` if the file cannot be opened or a read fails.
pub async fn fingerprint(path: &Path) -> Result<Fingerprint, HashError> {
    fingerprint_chunked(path, CHUNK_SIZE).await
}

/// Fingerprint a file reading `chunk_size` bytes at a time
///
/// The whole stream is consumed before a digest is produced; a failed read
/// discards the partial state.
///
/// # Errors
/// Returns `HashError::Io` if the file cannot be opened or a read fails.
pub async fn fingerprint_chunked(
    path: &Path,
    chunk_size: usize,
) -> Result<Fingerprint, HashError> {
    let io_err = |source| HashError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).await.map_err(io_err)?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; chunk_size.max(1)];

    loop {
        let n = file.read(&mut buf).await.map_err(io_err)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(Fingerprint(format!("{:x}", hasher.finalize())))
}
