//! Label-related Neo4j queries

use neo4rs::Query;

use super::Neo4jStore;
use crate::store::model::{Category, LabelScores};
use crate::store::StoreError;

/// `SET` clause assigning every category property from a same-named param
fn label_assignments() -> String {
    Category::ALL
        .iter()
        .map(|c| format!("i.{0} = ${0}", c.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

impl Neo4jStore {
    /// Overwrite the category scores of an image
    ///
    /// # Errors
    /// Returns `StoreError::NotFound` if no image has this id, or an error if
    /// the query fails.
    pub async fn set_labels(&self, image_id: i64, scores: &LabelScores) -> Result<(), StoreError> {
        let cypher = format!(
            "MATCH (i:Image) WHERE id(i) = $image_id SET {} RETURN id(i) AS id",
            label_assignments()
        );

        let mut query = Query::new(cypher).param("image_id", image_id);
        for (category, value) in scores.iter() {
            query = query.param(category.as_str(), value);
        }

        let mut result = self.graph().execute(query).await?;

        if result.next().await?.is_none() {
            return Err(StoreError::NotFound(image_id));
        }

        tracing::debug!("Updated labels for image {}", image_id);
        Ok(())
    }
}
