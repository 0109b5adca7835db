//! stk-core: shared types, IDs, errors, outcomes and configuration.
//!
//! This crate is the foundational dependency for the other stickerforge
//! crates. It carries the media-domain vocabulary (what a user sent, what
//! they asked for, which recipe converts it), the unified error taxonomy
//! and the JSON configuration.

pub mod config;
pub mod error;
pub mod ids;
pub mod media;
pub mod outcome;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, FailureKind, Result};
pub use ids::*;
pub use media::*;
pub use outcome::{Artifact, JobOutcome};
