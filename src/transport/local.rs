use std::path::{Path, PathBuf};

use async_trait::async_trait;
use stk_core::{Artifact, ConversionRecipe, Error, Result, SessionId, SourceHandle};

use super::Transport;
use crate::conversation::Reply;

/// Filesystem-backed transport: source handles are local paths and
/// artifacts are written into `output_dir`.
#[derive(Debug, Clone)]
pub struct LocalTransport {
    output_dir: PathBuf,
}

impl LocalTransport {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Where an artifact with `filename` ends up.
    pub fn artifact_path(&self, filename: &str) -> PathBuf {
        self.output_dir.join(filename)
    }
}

#[async_trait]
impl Transport for LocalTransport {
    async fn retrieve_bytes(&self, source: &SourceHandle, dest: &Path) -> Result<()> {
        tokio::fs::copy(source.as_str(), dest)
            .await
            .map_err(|e| Error::retrieval(format!("{source}: {e}")))?;
        Ok(())
    }

    async fn deliver_artifact(
        &self,
        session: SessionId,
        recipe: ConversionRecipe,
        artifact: &Artifact,
    ) -> Result<()> {
        tokio::fs::create_dir_all(&self.output_dir).await?;
        let path = self.artifact_path(&artifact.filename);
        tokio::fs::write(&path, &artifact.bytes).await?;
        tracing::info!(
            session = %session,
            recipe = %recipe,
            bytes = artifact.len(),
            "Wrote {}",
            path.display()
        );
        Ok(())
    }

    async fn notify_user(&self, session: SessionId, reply: &Reply) -> Result<()> {
        tracing::info!(session = %session, "{}", reply.text);
        Ok(())
    }
}
