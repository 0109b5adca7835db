//! Output validation: the last gate before an artifact leaves the core.

use std::path::Path;

use bytes::Bytes;
use stk_core::{Artifact, ConversionRecipe, Error, Result};

/// Check the produced file against the recipe's platform limits and load it.
///
/// Only recipes with a [`ConversionRecipe::size_limit`] are gated; today
/// that is the video sticker alone.
pub async fn validate(recipe: ConversionRecipe, path: &Path) -> Result<Artifact> {
    let size = tokio::fs::metadata(path).await?.len();
    tracing::info!(recipe = %recipe, bytes = size, "Artifact produced");

    if let Some(limit) = recipe.size_limit() {
        if size > limit {
            return Err(Error::SizeExceeded {
                actual: size,
                limit,
            });
        }
    }

    let bytes = tokio::fs::read(path).await?;
    Ok(Artifact {
        bytes: Bytes::from(bytes),
        filename: recipe.artifact_file_name().to_string(),
    })
}
