//! Boundary to the messaging transport.
//!
//! The core never talks to a chat network directly. Whatever carries
//! messages implements [`Transport`]; [`LocalTransport`] does it against the
//! local filesystem for the CLI.

use std::path::Path;

use async_trait::async_trait;
use stk_core::{Artifact, ConversionRecipe, Result, SessionId, SourceHandle};

use crate::conversation::Reply;

mod local;

pub use local::LocalTransport;

#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch the bytes behind `source` into `dest`.
    ///
    /// Implementations report failures as [`stk_core::Error::Retrieval`].
    async fn retrieve_bytes(&self, source: &SourceHandle, dest: &Path) -> Result<()>;

    /// Hand a finished artifact to the user.
    async fn deliver_artifact(
        &self,
        session: SessionId,
        recipe: ConversionRecipe,
        artifact: &Artifact,
    ) -> Result<()>;

    /// Show a text reply (and its keyboard) to the user.
    async fn notify_user(&self, session: SessionId, reply: &Reply) -> Result<()>;
}
