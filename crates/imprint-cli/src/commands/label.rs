//! Label command: Store classifier scores for an image

use anyhow::{Context, Result};
use imprint_core::{LabelScores, RecordStore};

use super::connect_store;
use crate::types::LabelArgs;

/// Run the label command
///
/// # Errors
/// Returns an error if the scores are invalid or the update fails.
pub async fn run(args: &LabelArgs) -> Result<()> {
    // Validate before connecting so bad input never reaches the store
    let scores = LabelScores::from_json(&args.scores).context("invalid --scores")?;

    let store = connect_store(&args.store).await?;
    store
        .update_labels(args.image_id, &scores)
        .await
        .with_context(|| format!("failed to label image {}", args.image_id))?;

    println!("✓ Labeled image {}", args.image_id);
    Ok(())
}
