//! The conversation controller: menu navigation plus the
//! classify → select → plan → execute → validate job.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use stk_av::{with_workspace, PlanBuilder, PlanExecutor, StepTimeouts, ToolRegistry};
use stk_core::config::Config;
use stk_core::{
    Artifact, ConversionRecipe, Error, JobId, JobOutcome, MediaSubmission, Result, SessionId,
};
use tracing::Instrument;

use super::menu::{render_outcome, MenuSelection, Reply, TextInput};
use super::session::SessionStore;
use crate::pipeline::{classify, select, validate, InboundMedia};
use crate::transport::Transport;

/// Drives one bot instance. Cheap to share behind an `Arc`; jobs for
/// different sessions may run concurrently.
///
/// Jobs for the *same* session are not serialized here. A second message
/// that arrives while a job is in flight races with the job's final
/// pending-mode reset, so the transport should deliver each session's
/// messages one at a time.
pub struct StickerBot<T> {
    sessions: SessionStore,
    planner: PlanBuilder,
    executor: PlanExecutor,
    workspace_root: Option<PathBuf>,
    transport: Arc<T>,
}

impl<T: Transport> StickerBot<T> {
    pub fn new(
        config: &Config,
        sessions: SessionStore,
        executor: PlanExecutor,
        transport: Arc<T>,
    ) -> Self {
        Self {
            sessions,
            planner: PlanBuilder::new(StepTimeouts::from(&config.conversion)),
            executor,
            workspace_root: config.conversion.workspace_root.clone(),
            transport,
        }
    }

    /// Build a bot using the ffmpeg discovered from `config`.
    pub fn from_config(config: &Config, transport: Arc<T>) -> Result<Self> {
        let tools = ToolRegistry::discover(&config.tools);
        let executor = PlanExecutor::from_registry(&tools)?;
        Ok(Self::new(config, SessionStore::new(), executor, transport))
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `/start`: forget any pending conversion and show the main menu.
    pub fn on_start(&self, session: SessionId) -> Reply {
        self.sessions.clear(session);
        tracing::info!(session = %session, "Returned to main menu");
        Reply::main_menu()
    }

    /// The back button behaves exactly like `/start`.
    pub fn on_back(&self, session: SessionId) -> Reply {
        self.on_start(session)
    }

    /// Help leaves the pending mode untouched.
    pub fn on_help(&self, _session: SessionId) -> Reply {
        Reply::help()
    }

    /// Remember what the user wants to make and ask for the media.
    pub fn on_menu_selection(&self, session: SessionId, selection: MenuSelection) -> Reply {
        self.sessions.set_pending(session, selection.pending_mode());
        tracing::info!(session = %session, ?selection, "Menu selection");
        selection.prompt()
    }

    /// Route any text message. Unrecognised text gets a hint and does not
    /// change the pending mode.
    pub fn on_text(&self, session: SessionId, text: &str) -> Reply {
        match TextInput::parse(text) {
            TextInput::Start => self.on_start(session),
            TextInput::Back => self.on_back(session),
            TextInput::Help => self.on_help(session),
            TextInput::Select(selection) => self.on_menu_selection(session, selection),
            TextInput::Other => Reply::use_menu(),
        }
    }

    /// Run one conversion attempt for the media a user just sent.
    ///
    /// Whatever happens, the session's pending mode is `None` afterwards and
    /// no workspace is left on disk.
    pub async fn on_media_submitted(&self, session: SessionId, media: &InboundMedia) -> JobOutcome {
        let job = JobId::new();
        let span = tracing::info_span!("job", job = %job, session = %session);

        async {
            let mode = self.sessions.get_pending(session);

            let selected = if mode.is_pending() {
                classify(media).and_then(|submission| {
                    select(mode, &submission).map(|recipe| (submission, recipe))
                })
            } else {
                Err(Error::NoPendingOperation)
            };

            let outcome = match selected {
                Err(e) => {
                    tracing::info!(mode = %mode, "Rejected submission: {e}");
                    JobOutcome::failure(None, &e)
                }
                Ok((submission, recipe)) => {
                    tracing::info!(
                        recipe = %recipe,
                        kind = %submission.kind(),
                        "Starting conversion"
                    );
                    match self.convert(session, recipe, &submission).await {
                        Ok(artifact) => {
                            tracing::info!(recipe = %recipe, bytes = artifact.len(), "Conversion succeeded");
                            JobOutcome::Success { recipe, artifact }
                        }
                        Err(e) => {
                            tracing::error!(recipe = %recipe, kind = %e.kind(), "Conversion failed: {e}");
                            JobOutcome::failure(Some(recipe), &e)
                        }
                    }
                }
            };

            self.sessions.clear(session);
            outcome
        }
        .instrument(span)
        .await
    }

    /// Full round trip for a media message: run the job, deliver the
    /// artifact on success and send the rendered reply.
    ///
    /// A failed delivery is still answered with a failure reply before the
    /// delivery error is returned.
    pub async fn handle_media(&self, session: SessionId, media: &InboundMedia) -> Result<JobOutcome> {
        let outcome = self.on_media_submitted(session, media).await;

        if let JobOutcome::Success { recipe, ref artifact } = outcome {
            if let Err(e) = self
                .transport
                .deliver_artifact(session, recipe, artifact)
                .await
            {
                tracing::error!(session = %session, recipe = %recipe, "Artifact delivery failed: {e}");
                let failed = JobOutcome::failure(Some(recipe), &e);
                self.transport
                    .notify_user(session, &render_outcome(&failed))
                    .await?;
                return Err(e);
            }
        }

        self.transport
            .notify_user(session, &render_outcome(&outcome))
            .await?;
        Ok(outcome)
    }

    async fn convert(
        &self,
        session: SessionId,
        recipe: ConversionRecipe,
        submission: &MediaSubmission,
    ) -> Result<Artifact> {
        with_workspace(self.workspace_root.as_deref(), |dir| async move {
            let result = self.run_in(&dir, recipe, submission).await;
            // Reset before the workspace goes away.
            self.sessions.clear(session);
            result
        })
        .await
    }

    async fn run_in(
        &self,
        dir: &Path,
        recipe: ConversionRecipe,
        submission: &MediaSubmission,
    ) -> Result<Artifact> {
        let input = dir.join(submission.kind().source_file_name());
        self.transport
            .retrieve_bytes(submission.source(), &input)
            .await?;

        let plan = self.planner.build(recipe, submission.kind(), &input, dir);
        let output = self.executor.execute(plan).await?;
        validate(recipe, &output).await
    }
}
