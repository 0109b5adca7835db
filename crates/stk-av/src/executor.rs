//! Runs a [`TranscodePlan`] step by step.

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::command::ToolCommand;
use crate::plan::TranscodePlan;
use crate::tools::{ToolRegistry, FFMPEG};

/// Executes transcode plans with a fixed transcoder binary.
#[derive(Debug, Clone)]
pub struct PlanExecutor {
    program: PathBuf,
}

impl PlanExecutor {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Build an executor for the ffmpeg found in `tools`.
    pub fn from_registry(tools: &ToolRegistry) -> stk_core::Result<Self> {
        Ok(Self::new(tools.require(FFMPEG)?.path.clone()))
    }

    /// Run every step in order and return the final step's output path.
    ///
    /// Stops at the first failing step: a timeout yields
    /// [`stk_core::Error::Timeout`], a non-zero exit
    /// [`stk_core::Error::Transcoder`] carrying stderr. Nothing is retried.
    pub async fn execute(&self, plan: TranscodePlan) -> stk_core::Result<PathBuf> {
        let recipe = plan.recipe();
        let workspace = plan.workspace().to_path_buf();
        let final_output = plan
            .final_output()
            .map(Path::to_path_buf)
            .ok_or_else(|| stk_core::Error::Internal("empty transcode plan".into()))?;
        let steps = plan.into_steps();
        let total = steps.len();

        for (i, step) in steps.into_iter().enumerate() {
            tracing::debug!(
                recipe = %recipe,
                step = i + 1,
                "{} {}",
                self.program.display(),
                step
            );

            let started = Instant::now();
            let result = ToolCommand::new(self.program.clone())
                .args(step.args)
                .timeout(step.timeout)
                .current_dir(&workspace)
                .execute()
                .await;

            if let Err(e) = result {
                tracing::error!(recipe = %recipe, step = i + 1, total, "Transcode step failed: {e}");
                return Err(e);
            }

            if !step.output.exists() {
                return Err(stk_core::Error::transcoder(
                    FFMPEG,
                    format!("step {} produced no {}", i + 1, step.output.display()),
                ));
            }

            tracing::info!(
                recipe = %recipe,
                step = i + 1,
                total,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Transcode step finished"
            );
        }

        Ok(final_output)
    }
}
