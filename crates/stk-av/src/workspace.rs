//! Per-job scratch directories.
//!
//! A [`Workspace`] owns a temporary directory for one conversion job. The
//! directory and everything in it is removed when the workspace is dropped,
//! so every exit path (early `?` return, timeout, panic unwinding through the
//! job, cancellation of the job future) releases it. Removal failures are
//! logged and swallowed so they never mask the job's own result.

use std::future::Future;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

const PREFIX: &str = "stickerforge-";

/// Exclusively owned temporary directory for one job.
#[derive(Debug)]
pub struct Workspace {
    temp_dir: Option<TempDir>,
    path: PathBuf,
}

impl Workspace {
    /// Create a new workspace under `root`, or the system temp dir when
    /// `root` is `None`.
    pub fn new(root: Option<&Path>) -> stk_core::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(PREFIX);

        let temp_dir = match root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(|e| stk_core::Error::Internal(format!("failed to create workspace: {e}")))?;

        let path = temp_dir.path().to_path_buf();
        tracing::debug!("Created workspace {}", path.display());

        Ok(Self {
            temp_dir: Some(temp_dir),
            path,
        })
    }

    /// Path to the workspace directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the workspace now, logging (not returning) any failure.
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(temp_dir) = self.temp_dir.take() {
            match temp_dir.close() {
                Ok(()) => tracing::debug!("Removed workspace {}", self.path.display()),
                Err(e) => tracing::warn!(
                    "Failed to remove workspace {}: {e}",
                    self.path.display()
                ),
            }
        }
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        self.release();
    }
}

/// Run `job` with the path of a fresh workspace, removing the workspace when
/// the job finishes, fails, panics or is cancelled.
pub async fn with_workspace<F, Fut, T>(root: Option<&Path>, job: F) -> stk_core::Result<T>
where
    F: FnOnce(PathBuf) -> Fut,
    Fut: Future<Output = stk_core::Result<T>>,
{
    let workspace = Workspace::new(root)?;
    let result = job(workspace.path().to_path_buf()).await;
    workspace.close();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::{Arc, Mutex};

    #[test]
    fn workspace_lives_under_root() {
        let root = tempfile::tempdir().unwrap();
        let ws = Workspace::new(Some(root.path())).unwrap();
        assert!(ws.path().starts_with(root.path()));
        assert!(ws.path().is_dir());
        let name = ws.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with(PREFIX));
    }

    #[test]
    fn drop_removes_contents() {
        let ws = Workspace::new(None).unwrap();
        let path = ws.path().to_path_buf();
        fs::write(ws.path().join("output.webm"), b"data").unwrap();
        drop(ws);
        assert!(!path.exists());
    }

    #[test]
    fn missing_root_is_an_error() {
        let result = Workspace::new(Some(Path::new("/nonexistent/stickerforge/root")));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn removed_after_success() {
        let mut seen = None;
        let value = with_workspace(None, |dir| {
            seen = Some(dir.clone());
            async move {
                fs::write(dir.join("sticker.webp"), b"RIFF")?;
                Ok(7)
            }
        })
        .await
        .unwrap();
        assert_eq!(value, 7);
        assert!(!seen.unwrap().exists());
    }

    #[tokio::test]
    async fn removed_after_failure() {
        let mut seen = None;
        let result: stk_core::Result<()> = with_workspace(None, |dir| {
            seen = Some(dir.clone());
            async move {
                fs::write(dir.join("input.mp4"), b"data")?;
                Err(stk_core::Error::transcoder("ffmpeg", "boom"))
            }
        })
        .await;
        assert!(result.is_err());
        assert!(!seen.unwrap().exists());
    }

    #[tokio::test]
    async fn removed_after_panic() {
        let seen: Arc<Mutex<Option<PathBuf>>> = Arc::new(Mutex::new(None));
        let seen_in_task = Arc::clone(&seen);

        let handle = tokio::spawn(async move {
            with_workspace(None, |dir| async move {
                *seen_in_task.lock().unwrap() = Some(dir.clone());
                fs::write(dir.join("input.mp4"), b"data")?;
                if dir.exists() {
                    panic!("job crashed");
                }
                Ok(())
            })
            .await
        });

        assert!(handle.await.unwrap_err().is_panic());
        let path = seen.lock().unwrap().clone().unwrap();
        assert!(!path.exists());
    }
}
