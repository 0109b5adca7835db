//! Terminal result of one conversion attempt.

use bytes::Bytes;

use crate::error::{Error, FailureKind};
use crate::media::ConversionRecipe;

/// A validated artifact ready to leave the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub bytes: Bytes,
    pub filename: String,
}

impl Artifact {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Tagged result reported to the transport. Never retried automatically.
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    Success {
        recipe: ConversionRecipe,
        artifact: Artifact,
    },
    Failure {
        /// Recipe that was being produced, when selection got that far.
        recipe: Option<ConversionRecipe>,
        kind: FailureKind,
        detail: String,
    },
}

impl JobOutcome {
    /// Fold an error into a failure outcome.
    pub fn failure(recipe: Option<ConversionRecipe>, err: &Error) -> Self {
        JobOutcome::Failure {
            recipe,
            kind: err.kind(),
            detail: err.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, JobOutcome::Success { .. })
    }

    /// The failure kind, if this is a failure.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            JobOutcome::Success { .. } => None,
            JobOutcome::Failure { kind, .. } => Some(*kind),
        }
    }

    pub fn recipe(&self) -> Option<ConversionRecipe> {
        match self {
            JobOutcome::Success { recipe, .. } => Some(*recipe),
            JobOutcome::Failure { recipe, .. } => *recipe,
        }
    }
}
