//! Store module: Record model and the remote record store
//!
//! The pipeline talks to the store only through [`RecordStore`], so a
//! single shared handle can be injected into every worker.

pub mod model;
pub mod neo4j;
mod queries;

use async_trait::async_trait;
use thiserror::Error;

use crate::hash::Fingerprint;
use model::{ImageRecord, LabelScores};

/// Errors that can occur during record store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached; the call may succeed if retried
    #[error("Record store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected an insert because the fingerprint already exists
    #[error("Fingerprint already registered: {0}")]
    Conflict(String),

    #[error("Image not found: {0}")]
    NotFound(i64),

    #[error("Query error: {0}")]
    Query(String),
}

impl StoreError {
    /// Whether this error means the store was unreachable
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }

    /// Whether this error is a uniqueness conflict on insert
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

/// Keyed lookup/insert service holding one record per fingerprint
///
/// Implementations are shared across concurrent workers without
/// client-side locking, so they must be `Send + Sync`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Look up the record for a fingerprint, if any (at most one)
    async fn find_by_fingerprint(
        &self,
        fingerprint: &Fingerprint,
    ) -> Result<Option<ImageRecord>, StoreError>;

    /// Insert a new record without reading it back
    ///
    /// Fails with [`StoreError::Conflict`] when the fingerprint is taken.
    async fn insert_image(&self, path: &str, fingerprint: &Fingerprint)
        -> Result<(), StoreError>;

    /// Overwrite the labeling fields of an existing record
    async fn update_labels(&self, image_id: i64, scores: &LabelScores) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests;
