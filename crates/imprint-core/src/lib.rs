//! imprint-core: Core library for content-addressed image ingestion
//!
//! Walks a directory tree, fingerprints every image with SHA-256 and
//! registers only content the record store has not seen before. Paths whose
//! content is already known are appended to a duplicate ledger.
//!
//! # Pipeline
//!
//! - **Scanner** - enumerates candidate images by extension
//! - **Hasher** - streams each file into a content fingerprint
//! - **Oracle** - asks the record store whether the fingerprint is known
//! - **Registrar** - inserts novel records, catching late conflicts
//! - **Ledger** - append-only log of duplicate paths

pub mod hash;
pub mod ledger;
pub mod pipeline;
pub mod scanner;
pub mod store;

// Re-export commonly used types
pub use hash::{Fingerprint, fingerprint};
pub use ledger::Ledger;
pub use pipeline::{FileOutcome, IngestConfig, IngestError, IngestRun, IngestSummary, Pipeline};
pub use scanner::{Candidate, ImageFormat, Scanner};
pub use store::model::{Category, ImageRecord, LabelScores};
pub use store::neo4j::{Neo4jConfig, Neo4jStore};
pub use store::{RecordStore, StoreError};
