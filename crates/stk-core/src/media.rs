//! Media-domain types: what the user sent, what they asked for, and which
//! recipe turns one into the other.
//!
//! All enums serialize in kebab-case and implement `Display` manually for
//! consistent string representation in logs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Platform ceiling for a looping video sticker (256 KiB).
pub const STICKER_SIZE_LIMIT_BYTES: u64 = 256 * 1024;

/// Longest source accepted for a looping video sticker.
pub const LOOP_STICKER_MAX_DURATION: Duration = Duration::from_secs(3);

// ---------------------------------------------------------------------------
// MediaKind
// ---------------------------------------------------------------------------

/// Kind of an inbound media submission after classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaKind {
    /// A still photo.
    Image,
    /// A regular video message.
    Video,
    /// A circular "video note".
    VideoNote,
    /// A file attachment whose mime type claims a video.
    DocumentVideo,
}

impl MediaKind {
    /// Whether the source is the circular video-note shape.
    pub fn is_circular(&self) -> bool {
        matches!(self, Self::VideoNote)
    }

    /// File name used when the source bytes are downloaded into a workspace.
    pub fn source_file_name(&self) -> &'static str {
        match self {
            Self::Image => "photo.jpg",
            Self::Video | Self::VideoNote | Self::DocumentVideo => "input.mp4",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Video => write!(f, "video"),
            Self::VideoNote => write!(f, "video-note"),
            Self::DocumentVideo => write!(f, "document-video"),
        }
    }
}

// ---------------------------------------------------------------------------
// SourceHandle / MediaSubmission
// ---------------------------------------------------------------------------

/// Opaque transport reference to retrievable bytes (a file id, a path...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceHandle(String);

impl SourceHandle {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A classified inbound submission. Produced once per message, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaSubmission {
    kind: MediaKind,
    source: SourceHandle,
    duration: Option<Duration>,
}

impl MediaSubmission {
    pub fn new(kind: MediaKind, source: SourceHandle, duration: Option<Duration>) -> Self {
        Self {
            kind,
            source,
            duration,
        }
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn source(&self) -> &SourceHandle {
        &self.source
    }

    /// Declared duration; present for video-like kinds when the transport
    /// knows it.
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }
}

// ---------------------------------------------------------------------------
// PendingMode
// ---------------------------------------------------------------------------

/// Which conversion a session is waiting to receive media for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PendingMode {
    #[default]
    None,
    AwaitingImage,
    AwaitingAnimationSource,
    AwaitingLoopStickerSource,
}

impl PendingMode {
    pub fn is_pending(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for PendingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::AwaitingImage => write!(f, "awaiting-image"),
            Self::AwaitingAnimationSource => write!(f, "awaiting-animation-source"),
            Self::AwaitingLoopStickerSource => write!(f, "awaiting-loop-sticker-source"),
        }
    }
}

// ---------------------------------------------------------------------------
// ConversionRecipe
// ---------------------------------------------------------------------------

/// The closed set of conversions the bot knows how to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConversionRecipe {
    /// 512x512 WebP still sticker.
    StaticSticker,
    /// Palette-optimised GIF animation.
    AnimatedGif,
    /// 512x512 VP9 WebM video sticker.
    LoopingVideoSticker,
}

impl ConversionRecipe {
    /// File name the artifact is delivered under.
    pub fn artifact_file_name(&self) -> &'static str {
        match self {
            Self::StaticSticker => "sticker.webp",
            Self::AnimatedGif => "animation.gif",
            Self::LoopingVideoSticker => "sticker.webm",
        }
    }

    /// Byte ceiling enforced on the artifact, if any.
    ///
    /// Only the video sticker is gated. Static stickers and GIFs are
    /// delivered whatever their size.
    pub fn size_limit(&self) -> Option<u64> {
        match self {
            Self::LoopingVideoSticker => Some(STICKER_SIZE_LIMIT_BYTES),
            Self::StaticSticker | Self::AnimatedGif => None,
        }
    }
}

impl fmt::Display for ConversionRecipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaticSticker => write!(f, "static-sticker"),
            Self::AnimatedGif => write!(f, "animated-gif"),
            Self::LoopingVideoSticker => write!(f, "looping-video-sticker"),
        }
    }
}
