//! Neo4j-backed record store

use std::sync::Arc;

use async_trait::async_trait;
use neo4rs::{ConfigBuilder, Graph, Neo4jErrorKind, Query};

use super::model::{ImageRecord, LabelScores};
use super::{RecordStore, StoreError};
use crate::hash::Fingerprint;

/// Server status code for a violated uniqueness constraint
const CONSTRAINT_VIOLATION: &str = "Neo.ClientError.Schema.ConstraintValidationFailed";

impl From<neo4rs::Error> for StoreError {
    fn from(err: neo4rs::Error) -> Self {
        match &err {
            neo4rs::Error::Neo4j(e) => classify_server_error(e.code(), e.message()),
            neo4rs::Error::IOError { .. } | neo4rs::Error::ConnectionError => {
                Self::Unavailable(err.to_string())
            }
            _ => Self::Query(err.to_string()),
        }
    }
}

/// Map a server failure status code onto a store error
pub(crate) fn classify_server_error(code: &str, message: &str) -> StoreError {
    if code == CONSTRAINT_VIOLATION {
        return StoreError::Conflict(message.to_string());
    }
    match Neo4jErrorKind::from(code) {
        Neo4jErrorKind::Transient => StoreError::Unavailable(format!("{code}: {message}")),
        _ => StoreError::Query(format!("{code}: {message}")),
    }
}

/// Configuration for Neo4j connection
#[derive(Debug, Clone)]
pub struct Neo4jConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub database: Option<String>,
}

impl Neo4jConfig {
    /// Create a new Neo4j configuration
    #[must_use]
    pub fn new(
        uri: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            user: user.into(),
            password: password.into(),
            database: None,
        }
    }

    /// Set the database name
    #[must_use]
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }
}

/// Record store holding one `Image` node per fingerprint
///
/// The underlying driver pools connections, so one instance is shared by
/// every worker.
pub struct Neo4jStore {
    graph: Arc<Graph>,
}

impl Neo4jStore {
    /// Connect to Neo4j and ensure the fingerprint constraint exists
    ///
    /// # Errors
    /// Returns an error if the connection fails.
    pub async fn connect(config: &Neo4jConfig) -> Result<Self, StoreError> {
        let mut builder = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password);

        if let Some(db) = &config.database {
            builder = builder.db(db.as_str());
        }

        let neo_config = builder
            .build()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let graph = Graph::connect(neo_config).await?;

        let store = Self {
            graph: Arc::new(graph),
        };

        store.ensure_constraints().await?;

        Ok(store)
    }

    /// Create the uniqueness constraint inserts rely on for conflict detection
    async fn ensure_constraints(&self) -> Result<(), StoreError> {
        let constraints = [
            "CREATE CONSTRAINT image_hash_unique IF NOT EXISTS FOR (i:Image) REQUIRE i.hash IS UNIQUE",
        ];

        for stmt in constraints {
            self.graph.run(Query::new(stmt.to_string())).await?;
        }

        Ok(())
    }

    /// Get access to the graph for query modules
    pub(super) fn graph(&self) -> &Graph {
        &self.graph
    }
}

#[async_trait]
impl RecordStore for Neo4jStore {
    async fn find_by_fingerprint(
        &self,
        fingerprint: &Fingerprint,
    ) -> Result<Option<ImageRecord>, StoreError> {
        self.find_image_by_hash(fingerprint).await
    }

    async fn insert_image(
        &self,
        path: &str,
        fingerprint: &Fingerprint,
    ) -> Result<(), StoreError> {
        self.create_image(path, fingerprint).await
    }

    async fn update_labels(&self, image_id: i64, scores: &LabelScores) -> Result<(), StoreError> {
        self.set_labels(image_id, scores).await
    }
}
