//! CLI commands

pub mod ingest;
pub mod label;

use anyhow::Result;
use imprint_core::{Neo4jConfig, Neo4jStore};
use tracing::info;

use crate::types::StoreArgs;

/// Connect to the record store described by the CLI flags
async fn connect_store(args: &StoreArgs) -> Result<Neo4jStore> {
    let mut config = Neo4jConfig::new(&args.neo4j_uri, &args.neo4j_user, &args.neo4j_password);
    if let Some(db) = &args.database {
        config = config.with_database(db);
    }
    info!("Connecting to record store at {}", args.neo4j_uri);
    Ok(Neo4jStore::connect(&config).await?)
}
