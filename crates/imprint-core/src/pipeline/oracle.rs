//! Duplicate oracle: asks the record store whether a fingerprint is known

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::hash::Fingerprint;
use crate::store::{RecordStore, StoreError};

/// Answer to assume when a lookup fails, or `None` to surface the error
///
/// An unreachable store is read as "not a duplicate": ingestion keeps moving
/// and a true duplicate is still caught by the insert conflict.
#[must_use]
pub fn lookup_fallback(err: &StoreError) -> Option<bool> {
    err.is_transient().then_some(false)
}

/// Pre-insert duplicate check against the record store
pub struct DuplicateOracle {
    store: Arc<dyn RecordStore>,
    backoff: Duration,
}

impl DuplicateOracle {
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>, backoff: Duration) -> Self {
        Self { store, backoff }
    }

    /// Whether a record with this fingerprint already exists
    ///
    /// Transient failures wait out the backoff and resolve through
    /// [`lookup_fallback`] instead of erroring.
    ///
    /// # Errors
    /// Returns the store error when the fallback policy does not cover it.
    pub async fn exists(&self, fingerprint: &Fingerprint) -> Result<bool, StoreError> {
        match self.store.find_by_fingerprint(fingerprint).await {
            Ok(record) => Ok(record.is_some()),
            Err(err) => match lookup_fallback(&err) {
                Some(assumed) => {
                    warn!("Lookup for {} failed ({}), assuming novel", fingerprint, err);
                    tokio::time::sleep(self.backoff).await;
                    Ok(assumed)
                }
                None => Err(err),
            },
        }
    }
}
