//! Recipe selection: pairs the pending mode with the classified media.

use stk_core::{
    ConversionRecipe, Error, MediaKind, MediaSubmission, PendingMode, Result,
    LOOP_STICKER_MAX_DURATION,
};

/// Choose the recipe for `submission` given the session's pending mode.
///
/// | mode | accepted kinds | recipe |
/// |---|---|---|
/// | awaiting image | image | static sticker |
/// | awaiting animation source | video, document video | GIF |
/// | awaiting loop sticker source | video, video note, document video | video sticker (at most 3 s) |
pub fn select(mode: PendingMode, submission: &MediaSubmission) -> Result<ConversionRecipe> {
    let kind = submission.kind();
    let mismatch = || Error::KindMismatch { mode, kind };

    match mode {
        PendingMode::None => Err(Error::NoPendingOperation),
        PendingMode::AwaitingImage => match kind {
            MediaKind::Image => Ok(ConversionRecipe::StaticSticker),
            _ => Err(mismatch()),
        },
        PendingMode::AwaitingAnimationSource => match kind {
            MediaKind::Video | MediaKind::DocumentVideo => Ok(ConversionRecipe::AnimatedGif),
            _ => Err(mismatch()),
        },
        PendingMode::AwaitingLoopStickerSource => match kind {
            MediaKind::Video | MediaKind::VideoNote | MediaKind::DocumentVideo => {
                // An unknown duration is let through; the encode caps it anyway.
                match submission.duration() {
                    Some(duration) if duration > LOOP_STICKER_MAX_DURATION => {
                        Err(Error::DurationExceeded {
                            duration,
                            limit: LOOP_STICKER_MAX_DURATION,
                        })
                    }
                    _ => Ok(ConversionRecipe::LoopingVideoSticker),
                }
            }
            MediaKind::Image => Err(mismatch()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::time::Duration;
    use stk_core::SourceHandle;

    fn sub(kind: MediaKind, secs: Option<u64>) -> MediaSubmission {
        MediaSubmission::new(kind, SourceHandle::new("f"), secs.map(Duration::from_secs))
    }

    #[test]
    fn image_mode_accepts_only_images() {
        assert_eq!(
            select(PendingMode::AwaitingImage, &sub(MediaKind::Image, None)).unwrap(),
            ConversionRecipe::StaticSticker
        );
        assert_matches!(
            select(PendingMode::AwaitingImage, &sub(MediaKind::Video, Some(1))),
            Err(Error::KindMismatch { .. })
        );
    }

    #[test]
    fn animation_mode_rejects_video_notes_and_images() {
        for kind in [MediaKind::Video, MediaKind::DocumentVideo] {
            assert_eq!(
                select(PendingMode::AwaitingAnimationSource, &sub(kind, Some(60))).unwrap(),
                ConversionRecipe::AnimatedGif
            );
        }
        for kind in [MediaKind::VideoNote, MediaKind::Image] {
            assert_matches!(
                select(PendingMode::AwaitingAnimationSource, &sub(kind, Some(1))),
                Err(Error::KindMismatch { .. })
            );
        }
    }

    #[test]
    fn loop_mode_accepts_all_video_kinds() {
        for kind in [MediaKind::Video, MediaKind::VideoNote, MediaKind::DocumentVideo] {
            assert_eq!(
                select(PendingMode::AwaitingLoopStickerSource, &sub(kind, Some(2))).unwrap(),
                ConversionRecipe::LoopingVideoSticker
            );
        }
        assert_matches!(
            select(PendingMode::AwaitingLoopStickerSource, &sub(MediaKind::Image, None)),
            Err(Error::KindMismatch { .. })
        );
    }

    #[test]
    fn loop_duration_boundary() {
        let mode = PendingMode::AwaitingLoopStickerSource;
        assert!(select(mode, &sub(MediaKind::Video, Some(3))).is_ok());
        assert_matches!(
            select(mode, &sub(MediaKind::Video, Some(4))),
            Err(Error::DurationExceeded { .. })
        );

        let just_over = MediaSubmission::new(
            MediaKind::VideoNote,
            SourceHandle::new("f"),
            Some(Duration::from_millis(3001)),
        );
        assert_matches!(select(mode, &just_over), Err(Error::DurationExceeded { .. }));
    }

    #[test]
    fn loop_unknown_duration_is_accepted() {
        assert!(select(
            PendingMode::AwaitingLoopStickerSource,
            &sub(MediaKind::DocumentVideo, None)
        )
        .is_ok());
    }

    #[test]
    fn nothing_pending_is_rejected() {
        assert_matches!(
            select(PendingMode::None, &sub(MediaKind::Image, None)),
            Err(Error::NoPendingOperation)
        );
    }
}
