//! Command types shared between main and library

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use imprint_core::pipeline::{DEFAULT_CONCURRENCY, DEFAULT_LEDGER};

#[derive(Parser)]
#[command(name = "imprint")]
#[command(author, version, about = "Content-addressed image ingestion", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ingest every image under a directory, skipping known content
    Ingest(IngestArgs),

    /// Store classifier scores for an ingested image
    Label(LabelArgs),
}

/// Record store connection flags
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Neo4j connection URI
    #[arg(long, default_value = "bolt://localhost:7687")]
    pub neo4j_uri: String,

    /// Neo4j username
    #[arg(long, default_value = "neo4j")]
    pub neo4j_user: String,

    /// Neo4j password
    #[arg(long)]
    pub neo4j_password: String,

    /// Neo4j database name
    #[arg(long)]
    pub database: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct IngestArgs {
    /// Directory to ingest
    pub path: PathBuf,

    /// Maximum number of files processed at once
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// File that duplicate paths are appended to
    #[arg(long, default_value = DEFAULT_LEDGER)]
    pub ledger: PathBuf,

    /// File that unreadable or unstorable paths are appended to
    #[arg(long)]
    pub failure_ledger: Option<PathBuf>,

    /// Show a progress bar
    #[arg(long)]
    pub progress: bool,

    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Args, Debug, Clone)]
pub struct LabelArgs {
    /// Store id of the image
    #[arg(long)]
    pub image_id: i64,

    /// Classifier output: a JSON object with all ten category scores
    #[arg(long)]
    pub scores: String,

    #[command(flatten)]
    pub store: StoreArgs,
}
