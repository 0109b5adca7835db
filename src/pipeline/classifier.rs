//! Inbound media classification.
//!
//! Turns the transport's description of a message into a [`MediaSubmission`].
//! The classifier does not know which conversion is pending; pairing kinds
//! with modes is the selector's job.

use std::time::Duration;

use stk_core::{Error, MediaKind, MediaSubmission, Result, SourceHandle};

/// A video-like attachment.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoRef {
    pub source: SourceHandle,
    pub duration: Option<Duration>,
}

/// A generic file attachment.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRef {
    pub source: SourceHandle,
    pub mime_type: Option<String>,
    pub duration: Option<Duration>,
}

/// What the transport saw attached to one inbound message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InboundMedia {
    /// Best available resolution of an attached photo.
    pub photo: Option<SourceHandle>,
    pub video: Option<VideoRef>,
    pub video_note: Option<VideoRef>,
    pub document: Option<DocumentRef>,
}

impl InboundMedia {
    pub fn photo(source: impl Into<String>) -> Self {
        Self {
            photo: Some(SourceHandle::new(source)),
            ..Self::default()
        }
    }

    pub fn video(source: impl Into<String>, duration: Option<Duration>) -> Self {
        Self {
            video: Some(VideoRef {
                source: SourceHandle::new(source),
                duration,
            }),
            ..Self::default()
        }
    }

    pub fn video_note(source: impl Into<String>, duration: Option<Duration>) -> Self {
        Self {
            video_note: Some(VideoRef {
                source: SourceHandle::new(source),
                duration,
            }),
            ..Self::default()
        }
    }

    pub fn document(source: impl Into<String>, mime_type: Option<&str>) -> Self {
        Self {
            document: Some(DocumentRef {
                source: SourceHandle::new(source),
                mime_type: mime_type.map(str::to_string),
                duration: None,
            }),
            ..Self::default()
        }
    }
}

fn is_video_mime(mime: &str) -> bool {
    mime.trim().to_ascii_lowercase().starts_with("video/")
}

/// Classify an inbound message.
///
/// Precedence: video note, video, photo, then a document whose mime type
/// claims a video. A document with any other (or no) mime type is
/// [`Error::UnsupportedMedia`], as is a message with no media at all.
pub fn classify(media: &InboundMedia) -> Result<MediaSubmission> {
    if let Some(ref note) = media.video_note {
        return Ok(MediaSubmission::new(
            MediaKind::VideoNote,
            note.source.clone(),
            note.duration,
        ));
    }

    if let Some(ref video) = media.video {
        return Ok(MediaSubmission::new(
            MediaKind::Video,
            video.source.clone(),
            video.duration,
        ));
    }

    if let Some(ref photo) = media.photo {
        return Ok(MediaSubmission::new(MediaKind::Image, photo.clone(), None));
    }

    match media.document {
        Some(ref doc) => match doc.mime_type.as_deref() {
            Some(mime) if is_video_mime(mime) => Ok(MediaSubmission::new(
                MediaKind::DocumentVideo,
                doc.source.clone(),
                doc.duration,
            )),
            Some(mime) => Err(Error::UnsupportedMedia(format!(
                "document of type {mime} is not a video"
            ))),
            None => Err(Error::UnsupportedMedia(
                "document without a content type".into(),
            )),
        },
        None => Err(Error::UnsupportedMedia("message carries no media".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn video_note_wins_over_video() {
        let media = InboundMedia {
            video: Some(VideoRef {
                source: SourceHandle::new("v"),
                duration: Some(Duration::from_secs(5)),
            }),
            ..InboundMedia::video_note("n", Some(Duration::from_secs(2)))
        };
        let sub = classify(&media).unwrap();
        assert_eq!(sub.kind(), MediaKind::VideoNote);
        assert_eq!(sub.source().as_str(), "n");
        assert_eq!(sub.duration(), Some(Duration::from_secs(2)));
    }

    #[test]
    fn video_wins_over_document() {
        let media = InboundMedia {
            video: Some(VideoRef {
                source: SourceHandle::new("v"),
                duration: None,
            }),
            ..InboundMedia::document("d", Some("video/mp4"))
        };
        assert_eq!(classify(&media).unwrap().kind(), MediaKind::Video);
    }

    #[test]
    fn photo_is_image() {
        let sub = classify(&InboundMedia::photo("p")).unwrap();
        assert_eq!(sub.kind(), MediaKind::Image);
        assert_eq!(sub.duration(), None);
    }

    #[test]
    fn video_document_is_accepted() {
        let sub = classify(&InboundMedia::document("d", Some("video/quicktime"))).unwrap();
        assert_eq!(sub.kind(), MediaKind::DocumentVideo);
    }

    #[test]
    fn mime_prefix_is_case_insensitive() {
        let sub = classify(&InboundMedia::document("d", Some("Video/MP4"))).unwrap();
        assert_eq!(sub.kind(), MediaKind::DocumentVideo);
    }

    #[test]
    fn non_video_document_is_unsupported() {
        let err = classify(&InboundMedia::document("d", Some("application/pdf"))).unwrap_err();
        assert_matches!(err, Error::UnsupportedMedia(ref msg) if msg.contains("application/pdf"));
    }

    #[test]
    fn untyped_document_is_unsupported() {
        let err = classify(&InboundMedia::document("d", None)).unwrap_err();
        assert_matches!(err, Error::UnsupportedMedia(_));
    }

    #[test]
    fn empty_message_is_unsupported() {
        assert_matches!(
            classify(&InboundMedia::default()),
            Err(Error::UnsupportedMedia(_))
        );
    }
}
