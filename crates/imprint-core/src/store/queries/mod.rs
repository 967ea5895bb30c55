//! Neo4j query modules organized by entity

mod image;
mod labels;

// Re-export Neo4jStore for the impl blocks
pub(super) use super::neo4j::Neo4jStore;
