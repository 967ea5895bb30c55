//! Registrar: inserts novel records and catches late duplicates

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::hash::Fingerprint;
use crate::ledger::{Ledger, LedgerError};
use crate::store::{RecordStore, StoreError};

/// Result of a registration attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// A new record was created
    Registered,
    /// The store already held this fingerprint; the path went to the ledger
    LateDuplicate,
}

/// Why a registration could not be completed
#[derive(Debug, thiserror::Error)]
pub enum RegistrarError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),
}

/// Inserts `{path, fingerprint}` records
pub struct Registrar {
    store: Arc<dyn RecordStore>,
    ledger: Arc<Ledger>,
}

impl Registrar {
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>, ledger: Arc<Ledger>) -> Self {
        Self { store, ledger }
    }

    /// Insert a record, routing uniqueness conflicts to the duplicate ledger
    ///
    /// # Errors
    /// Returns non-conflict store failures, a path that cannot be stored as
    /// text, or a ledger failure while recording a late duplicate.
    pub async fn register(
        &self,
        path: &Path,
        fingerprint: &Fingerprint,
    ) -> Result<Registration, RegistrarError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| RegistrarError::NonUtf8Path(path.to_path_buf()))?;

        match self.store.insert_image(path_str, fingerprint).await {
            Ok(()) => Ok(Registration::Registered),
            Err(err) if err.is_conflict() => {
                tracing::debug!("Late duplicate {}: {}", path_str, err);
                self.ledger.record(path).await?;
                Ok(Registration::LateDuplicate)
            }
            Err(err) => Err(err.into()),
        }
    }
}
