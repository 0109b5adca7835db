//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`], which wires a [`StickerBot`] to a fake `ffmpeg`
//! shell script and a [`RecordingTransport`] that keeps every delivery and
//! reply in memory.

#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use stickerforge::conversation::Reply;
use stickerforge::{StickerBot, Transport};
use stk_core::config::Config;
use stk_core::{Artifact, ConversionRecipe, Error, Result, SessionId, SourceHandle};
use tempfile::TempDir;

/// An artifact handed to [`Transport::deliver_artifact`].
#[derive(Debug, Clone)]
pub struct Delivery {
    pub session: SessionId,
    pub recipe: ConversionRecipe,
    pub filename: String,
    pub len: usize,
}

/// In-memory transport. Source handles are local paths.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    deliveries: Mutex<Vec<Delivery>>,
    replies: Mutex<Vec<(SessionId, Reply)>>,
    reject_deliveries: AtomicBool,
}

impl RecordingTransport {
    /// Make every later `deliver_artifact` call fail.
    pub fn reject_deliveries(&self) {
        self.reject_deliveries.store(true, Ordering::SeqCst);
    }

    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().unwrap().clone()
    }

    pub fn replies(&self) -> Vec<(SessionId, Reply)> {
        self.replies.lock().unwrap().clone()
    }

    pub fn last_reply(&self) -> Option<Reply> {
        self.replies.lock().unwrap().last().map(|(_, r)| r.clone())
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn retrieve_bytes(&self, source: &SourceHandle, dest: &Path) -> Result<()> {
        tokio::fs::copy(source.as_str(), dest)
            .await
            .map_err(|e| Error::retrieval(e.to_string()))?;
        Ok(())
    }

    async fn deliver_artifact(
        &self,
        session: SessionId,
        recipe: ConversionRecipe,
        artifact: &Artifact,
    ) -> Result<()> {
        if self.reject_deliveries.load(Ordering::SeqCst) {
            return Err(Error::Internal("upload rejected".into()));
        }
        self.deliveries.lock().unwrap().push(Delivery {
            session,
            recipe,
            filename: artifact.filename.clone(),
            len: artifact.len(),
        });
        Ok(())
    }

    async fn notify_user(&self, session: SessionId, reply: &Reply) -> Result<()> {
        self.replies.lock().unwrap().push((session, reply.clone()));
        Ok(())
    }
}

/// Write an executable `ffmpeg` stand-in into `dir`.
///
/// The script appends its arguments to `calls.log` next to itself, binds
/// its last argument (the output path) to `$last`, then runs `body`.
pub fn fake_ffmpeg(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("ffmpeg");
    let script = format!(
        "#!/bin/sh\necho \"$@\" >> '{log}'\nfor last; do :; done\n{body}\n",
        log = dir.join("calls.log").display()
    );
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Script body that succeeds with a one-byte output file.
pub const WRITES_OUTPUT: &str = "printf 'x' > \"$last\"";

/// A bot wired to a fake transcoder, with its own scratch directories.
pub struct TestHarness {
    pub bot: StickerBot<RecordingTransport>,
    bin: TempDir,
    workspace_root: TempDir,
    inputs: TempDir,
}

impl TestHarness {
    /// Harness whose fake `ffmpeg` runs `body`.
    pub fn new(body: &str) -> Self {
        Self::with_config(body, |_| {})
    }

    /// Like [`TestHarness::new`], letting the caller adjust the config first.
    pub fn with_config(body: &str, configure: impl FnOnce(&mut Config)) -> Self {
        let bin = tempfile::tempdir().unwrap();
        let workspace_root = tempfile::tempdir().unwrap();
        let inputs = tempfile::tempdir().unwrap();

        let mut config = Config::default();
        config.tools.ffmpeg_path = Some(fake_ffmpeg(bin.path(), body));
        config.conversion.workspace_root = Some(workspace_root.path().to_path_buf());
        configure(&mut config);

        let bot = StickerBot::from_config(&config, Arc::new(RecordingTransport::default()))
            .expect("fake ffmpeg should be discovered");

        Self {
            bot,
            bin,
            workspace_root,
            inputs,
        }
    }

    pub fn transport(&self) -> &RecordingTransport {
        self.bot.transport()
    }

    /// Create a source file and return its handle.
    pub fn source(&self, name: &str) -> String {
        let path = self.inputs.path().join(name);
        std::fs::write(&path, b"source media").unwrap();
        path.to_string_lossy().into_owned()
    }

    /// Arguments of every transcoder invocation so far, one line each.
    pub fn ffmpeg_calls(&self) -> Vec<String> {
        match std::fs::read_to_string(self.bin.path().join("calls.log")) {
            Ok(log) => log.lines().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Number of entries left under the workspace root.
    pub fn leftover_workspaces(&self) -> usize {
        std::fs::read_dir(self.workspace_root.path())
            .unwrap()
            .count()
    }
}
