//! Unified error type for stickerforge.
//!
//! Every stage of a conversion funnels its failures into [`Error`]. The
//! closed [`FailureKind`] classification, obtained via [`Error::kind`], is
//! what ends up in a [`crate::JobOutcome`] and drives the user-facing reply.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::media::{MediaKind, PendingMode};

/// Unified error type covering all failure modes of a conversion job.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Media arrived while the session was not waiting for any.
    #[error("no conversion is pending")]
    NoPendingOperation,

    /// Media arrived, but not of a kind the pending mode accepts.
    #[error("{kind} is not accepted while {mode}")]
    KindMismatch {
        /// The session's pending mode at the time.
        mode: PendingMode,
        /// The classified kind of the submission.
        kind: MediaKind,
    },

    /// The submission is not media we can convert at all.
    #[error("unsupported media: {0}")]
    UnsupportedMedia(String),

    /// The source video is longer than the recipe allows.
    #[error("video lasts {:.1}s, limit is {}s", .duration.as_secs_f64(), .limit.as_secs())]
    DurationExceeded {
        duration: Duration,
        limit: Duration,
    },

    /// The transcoder exited unsuccessfully or could not be started.
    #[error("Tool error [{tool}]: {message}")]
    Transcoder {
        /// Name of the tool that failed.
        tool: String,
        /// Captured diagnostic text.
        message: String,
    },

    /// A transcoder step overran its wall-clock bound.
    #[error("Tool error [{tool}]: timed out after {timeout:?}")]
    Timeout { tool: String, timeout: Duration },

    /// The produced artifact is larger than the platform accepts.
    #[error("artifact is {actual} bytes, limit is {limit}")]
    SizeExceeded { actual: u64, limit: u64 },

    /// The transport could not hand over the source bytes.
    #[error("retrieval failed: {0}")]
    Retrieval(String),

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(String),

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Closed classification of job failures, as reported in a
/// [`crate::JobOutcome::Failure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    NoPendingOperation,
    KindMismatch,
    UnsupportedMedia,
    DurationExceeded,
    TranscoderError,
    Timeout,
    SizeExceeded,
    RetrievalError,
    Internal,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NoPendingOperation => "no_pending_operation",
            Self::KindMismatch => "kind_mismatch",
            Self::UnsupportedMedia => "unsupported_media",
            Self::DurationExceeded => "duration_exceeded",
            Self::TranscoderError => "transcoder_error",
            Self::Timeout => "timeout",
            Self::SizeExceeded => "size_exceeded",
            Self::RetrievalError => "retrieval_error",
            Self::Internal => "internal",
        };
        f.write_str(s)
    }
}

impl Error {
    /// Map this error onto the closed failure taxonomy.
    pub fn kind(&self) -> FailureKind {
        match self {
            Error::NoPendingOperation => FailureKind::NoPendingOperation,
            Error::KindMismatch { .. } => FailureKind::KindMismatch,
            Error::UnsupportedMedia(_) => FailureKind::UnsupportedMedia,
            Error::DurationExceeded { .. } => FailureKind::DurationExceeded,
            Error::Transcoder { .. } => FailureKind::TranscoderError,
            Error::Timeout { .. } => FailureKind::Timeout,
            Error::SizeExceeded { .. } => FailureKind::SizeExceeded,
            Error::Retrieval(_) => FailureKind::RetrievalError,
            Error::Io { .. } | Error::Config(_) | Error::Internal(_) => FailureKind::Internal,
        }
    }

    /// Convenience constructor for [`Error::Transcoder`].
    pub fn transcoder(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Transcoder {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::Retrieval`].
    pub fn retrieval(message: impl fmt::Display) -> Self {
        Error::Retrieval(message.to_string())
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_mismatch_display() {
        let err = Error::KindMismatch {
            mode: PendingMode::AwaitingImage,
            kind: MediaKind::Video,
        };
        assert_eq!(err.to_string(), "video is not accepted while awaiting-image");
        assert_eq!(err.kind(), FailureKind::KindMismatch);
    }

    #[test]
    fn duration_display() {
        let err = Error::DurationExceeded {
            duration: Duration::from_millis(4500),
            limit: Duration::from_secs(3),
        };
        assert_eq!(err.to_string(), "video lasts 4.5s, limit is 3s");
        assert_eq!(err.kind(), FailureKind::DurationExceeded);
    }

    #[test]
    fn transcoder_display() {
        let err = Error::transcoder("ffmpeg", "exit status 1: Invalid data");
        assert_eq!(
            err.to_string(),
            "Tool error [ffmpeg]: exit status 1: Invalid data"
        );
        assert_eq!(err.kind(), FailureKind::TranscoderError);
    }

    #[test]
    fn timeout_is_distinct_from_transcoder_error() {
        let err = Error::Timeout {
            tool: "ffmpeg".into(),
            timeout: Duration::from_secs(30),
        };
        assert!(err.to_string().contains("timed out"));
        assert_eq!(err.kind(), FailureKind::Timeout);
        assert_ne!(err.kind(), FailureKind::TranscoderError);
    }

    #[test]
    fn size_exceeded_display() {
        let err = Error::SizeExceeded {
            actual: 300_000,
            limit: 262_144,
        };
        assert_eq!(err.to_string(), "artifact is 300000 bytes, limit is 262144");
        assert_eq!(err.kind(), FailureKind::SizeExceeded);
    }

    #[test]
    fn io_from_std_is_internal() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err = Error::from(io_err);
        assert!(matches!(err, Error::Io { .. }));
        assert_eq!(err.kind(), FailureKind::Internal);
    }

    #[test]
    fn retrieval_kind() {
        assert_eq!(
            Error::retrieval("404").kind(),
            FailureKind::RetrievalError
        );
    }
}
