//! Image-related Neo4j queries

use neo4rs::Query;

use super::Neo4jStore;
use crate::hash::Fingerprint;
use crate::store::model::ImageRecord;
use crate::store::StoreError;

impl Neo4jStore {
    /// Find the image registered under a fingerprint
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn find_image_by_hash(
        &self,
        fingerprint: &Fingerprint,
    ) -> Result<Option<ImageRecord>, StoreError> {
        let query = Query::new(
            r#"
            MATCH (i:Image {hash: $hash})
            RETURN id(i) AS id, i.path AS path
            LIMIT 1
            "#
            .to_string(),
        )
        .param("hash", fingerprint.as_str());

        let mut result = self.graph().execute(query).await?;

        let Some(row) = result.next().await? else {
            return Ok(None);
        };

        let id: i64 = row
            .get("id")
            .map_err(|e| StoreError::Query(e.to_string()))?;
        let path: String = row.get("path").unwrap_or_default();

        Ok(Some(ImageRecord {
            id,
            path,
            fingerprint: fingerprint.clone(),
        }))
    }

    /// Create a new image node
    ///
    /// Nothing is read back. A taken fingerprint surfaces as
    /// `StoreError::Conflict` through the uniqueness constraint.
    ///
    /// # Errors
    /// Returns an error if the insert is rejected or the query fails.
    pub async fn create_image(
        &self,
        path: &str,
        fingerprint: &Fingerprint,
    ) -> Result<(), StoreError> {
        let query = Query::new(
            r#"
            CREATE (i:Image {
                path: $path,
                hash: $hash
            })
            "#
            .to_string(),
        )
        .param("path", path)
        .param("hash", fingerprint.as_str());

        self.graph().run(query).await?;
        Ok(())
    }
}
