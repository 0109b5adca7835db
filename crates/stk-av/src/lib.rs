//! # stk-av
//!
//! Transcoder plumbing for the stickerforge pipeline.
//!
//! This crate provides:
//!
//! - **Tool discovery** ([`ToolRegistry`]) -- find and cache the path to ffmpeg.
//! - **Command execution** ([`ToolCommand`]) -- async builder with timeout
//!   support that kills the whole process group on expiry.
//! - **Workspace management** ([`Workspace`], [`with_workspace`]) -- per-job
//!   temporary directory removed on every exit path.
//! - **Plans** ([`PlanBuilder`], [`TranscodePlan`]) -- the ffmpeg invocations
//!   for each conversion recipe.
//! - **Execution** ([`PlanExecutor`]) -- runs a plan strictly in order.

pub mod command;
pub mod executor;
pub mod plan;
pub mod tools;
pub mod workspace;

// ---- Re-exports for convenience ----

pub use command::{ToolCommand, ToolOutput};
pub use executor::PlanExecutor;
pub use plan::{PlanBuilder, StepTimeouts, TranscodePlan, TranscodeStep};
pub use tools::{ToolConfig, ToolInfo, ToolRegistry, FFMPEG};
pub use workspace::{with_workspace, Workspace};
