//! Application configuration types.
//!
//! The top-level [`Config`] struct is deserialized from JSON. Every section
//! defaults sensibly so a completely empty `{}` file is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;
use crate::Error;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tools: ToolsConfig,
    pub conversion: ConversionConfig,
}

impl Config {
    /// Deserialize a `Config` from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str).map_err(|e| Error::Config(format!("parse error: {e}")))
    }

    /// Strictly load a configuration file; any read or parse problem is an
    /// error.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_json(&contents)
    }

    /// Load configuration from a file path, falling back to defaults if the
    /// path is `None` or the file does not exist.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file {}: {e}", path.display());
                Self::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read config file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if let Some(ref p) = self.tools.ffmpeg_path {
            if !p.exists() {
                warnings.push(format!(
                    "tools.ffmpeg_path {} does not exist; PATH will be searched",
                    p.display()
                ));
            }
        }

        if let Some(ref root) = self.conversion.workspace_root {
            if !root.is_dir() {
                warnings.push(format!(
                    "conversion.workspace_root {} is not a directory",
                    root.display()
                ));
            }
        }

        if self.conversion.step_timeout_secs == 0 {
            warnings.push("conversion.step_timeout_secs is 0; every step will time out".into());
        }
        if self.conversion.loop_sticker_timeout_secs == 0 {
            warnings.push(
                "conversion.loop_sticker_timeout_secs is 0; every video sticker will time out"
                    .into(),
            );
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Paths to external CLI tools.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub ffmpeg_path: Option<PathBuf>,
}

/// Conversion job settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Parent directory for per-job workspaces; system temp dir when unset.
    pub workspace_root: Option<PathBuf>,
    /// Bound for static sticker and GIF steps.
    #[serde(default = "default_step_timeout")]
    pub step_timeout_secs: u64,
    /// Bound for the video sticker encode.
    #[serde(default = "default_loop_sticker_timeout")]
    pub loop_sticker_timeout_secs: u64,
}

fn default_step_timeout() -> u64 {
    120
}

fn default_loop_sticker_timeout() -> u64 {
    30
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            workspace_root: None,
            step_timeout_secs: default_step_timeout(),
            loop_sticker_timeout_secs: default_loop_sticker_timeout(),
        }
    }
}

impl ConversionConfig {
    pub fn step_timeout(&self) -> Duration {
        Duration::from_secs(self.step_timeout_secs)
    }

    pub fn loop_sticker_timeout(&self) -> Duration {
        Duration::from_secs(self.loop_sticker_timeout_secs)
    }
}
