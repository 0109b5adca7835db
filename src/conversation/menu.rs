//! Menu buttons, commands and the user-facing texts the bot replies with.

use stk_core::{ConversionRecipe, FailureKind, JobOutcome, PendingMode};

pub const STATIC_STICKER_BUTTON: &str = "🖼 Static sticker";
pub const ANIMATED_STICKER_BUTTON: &str = "✨ Animated sticker";
pub const GIF_BUTTON: &str = "📸 GIF";
pub const HELP_BUTTON: &str = "ℹ️ Help";
pub const BACK_BUTTON: &str = "🔙 Back";

const MAIN_MENU_TEXT: &str = "Main menu:";
const HELP_TEXT: &str = "📚 Available commands:\n\n\
    /start - Main menu\n\
    /help - This help\n\n\
    Choose an action:\n\
    🖼 Static sticker\n\
    ✨ Animated sticker\n\
    📸 GIF";
const USE_MENU_TEXT: &str = "Use the menu buttons to talk to the bot";

/// Keyboard the transport should show along with a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyboard {
    /// Two rows: static/animated sticker, then GIF/help.
    MainMenu,
    /// A single back button.
    Back,
}

impl Keyboard {
    /// Button rows, top to bottom.
    pub fn rows(&self) -> Vec<Vec<&'static str>> {
        match self {
            Keyboard::MainMenu => vec![
                vec![STATIC_STICKER_BUTTON, ANIMATED_STICKER_BUTTON],
                vec![GIF_BUTTON, HELP_BUTTON],
            ],
            Keyboard::Back => vec![vec![BACK_BUTTON]],
        }
    }
}

/// A text reply plus the keyboard to show with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Keyboard,
}

impl Reply {
    pub fn new(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self {
            text: text.into(),
            keyboard,
        }
    }

    pub fn main_menu() -> Self {
        Self::new(MAIN_MENU_TEXT, Keyboard::MainMenu)
    }

    pub fn help() -> Self {
        Self::new(HELP_TEXT, Keyboard::MainMenu)
    }

    pub fn use_menu() -> Self {
        Self::new(USE_MENU_TEXT, Keyboard::MainMenu)
    }
}

/// A conversion chosen from the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuSelection {
    StaticSticker,
    AnimatedSticker,
    Gif,
}

impl MenuSelection {
    /// The mode the session enters after this selection.
    pub fn pending_mode(&self) -> PendingMode {
        match self {
            MenuSelection::StaticSticker => PendingMode::AwaitingImage,
            MenuSelection::AnimatedSticker => PendingMode::AwaitingLoopStickerSource,
            MenuSelection::Gif => PendingMode::AwaitingAnimationSource,
        }
    }

    /// Prompt asking for the media this selection needs.
    pub fn prompt(&self) -> Reply {
        let text = match self {
            MenuSelection::StaticSticker => "📸 Send a photo for the sticker",
            MenuSelection::AnimatedSticker => "🎥 Send a video for the sticker (up to 3 seconds)",
            MenuSelection::Gif => "📤 Send a video for the GIF (the first 10 seconds are used)",
        };
        Reply::new(text, Keyboard::Back)
    }
}

/// Parsed meaning of an inbound text message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextInput {
    Start,
    Help,
    Back,
    Select(MenuSelection),
    Other,
}

impl TextInput {
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        // Commands may carry a bot mention: "/start@stickerforge_bot".
        let command = text.split('@').next().unwrap_or(text);

        match (text, command) {
            (_, "/start") => TextInput::Start,
            (_, "/help") => TextInput::Help,
            (BACK_BUTTON, _) => TextInput::Back,
            (HELP_BUTTON, _) => TextInput::Help,
            (STATIC_STICKER_BUTTON, _) => TextInput::Select(MenuSelection::StaticSticker),
            (ANIMATED_STICKER_BUTTON, _) => TextInput::Select(MenuSelection::AnimatedSticker),
            (GIF_BUTTON, _) => TextInput::Select(MenuSelection::Gif),
            _ => TextInput::Other,
        }
    }
}

/// Render a job outcome into the message shown to the user.
pub fn render_outcome(outcome: &JobOutcome) -> Reply {
    let text = match outcome {
        JobOutcome::Success { recipe, .. } => match recipe {
            ConversionRecipe::StaticSticker => "✅ Sticker created!",
            ConversionRecipe::AnimatedGif => "✅ GIF created!",
            ConversionRecipe::LoopingVideoSticker => "✅ Video sticker created!",
        },
        JobOutcome::Failure { recipe, kind, .. } => match kind {
            FailureKind::NoPendingOperation => USE_MENU_TEXT,
            FailureKind::KindMismatch => {
                "❌ That is not what this option needs. Pick an action from the menu and try again"
            }
            FailureKind::UnsupportedMedia => "❌ Please send a video file",
            FailureKind::DurationExceeded => "❌ The video must be 3 seconds or shorter",
            FailureKind::TranscoderError => match recipe {
                Some(ConversionRecipe::StaticSticker) => "❌ Failed to create the sticker",
                Some(ConversionRecipe::AnimatedGif) => "❌ Failed to create the GIF",
                Some(ConversionRecipe::LoopingVideoSticker) => {
                    "❌ Failed to process the video. Check the file format"
                }
                None => "❌ Conversion failed",
            },
            FailureKind::Timeout => "⌛ Processing took too long, try a shorter video",
            FailureKind::SizeExceeded => "❌ The file is too large after conversion",
            FailureKind::RetrievalError => "❌ Could not download the file, please try again",
            FailureKind::Internal => "❌ An unexpected error occurred",
        },
    };
    Reply::new(text, Keyboard::MainMenu)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use stk_core::Artifact;

    #[test]
    fn parse_buttons_and_commands() {
        assert_eq!(TextInput::parse("/start"), TextInput::Start);
        assert_eq!(TextInput::parse("/start@stickerforge_bot"), TextInput::Start);
        assert_eq!(TextInput::parse("/help"), TextInput::Help);
        assert_eq!(TextInput::parse(HELP_BUTTON), TextInput::Help);
        assert_eq!(TextInput::parse(BACK_BUTTON), TextInput::Back);
        assert_eq!(
            TextInput::parse(GIF_BUTTON),
            TextInput::Select(MenuSelection::Gif)
        );
        assert_eq!(
            TextInput::parse(" ✨ Animated sticker "),
            TextInput::Select(MenuSelection::AnimatedSticker)
        );
        assert_eq!(TextInput::parse("hello"), TextInput::Other);
    }

    #[test]
    fn selections_map_to_modes() {
        assert_eq!(
            MenuSelection::StaticSticker.pending_mode(),
            PendingMode::AwaitingImage
        );
        assert_eq!(
            MenuSelection::AnimatedSticker.pending_mode(),
            PendingMode::AwaitingLoopStickerSource
        );
        assert_eq!(
            MenuSelection::Gif.pending_mode(),
            PendingMode::AwaitingAnimationSource
        );
    }

    #[test]
    fn prompts_offer_back_button() {
        let reply = MenuSelection::AnimatedSticker.prompt();
        assert_eq!(reply.keyboard, Keyboard::Back);
        assert!(reply.text.contains("3 seconds"));
    }

    #[test]
    fn main_menu_layout() {
        let rows = Keyboard::MainMenu.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec![STATIC_STICKER_BUTTON, ANIMATED_STICKER_BUTTON]);
        assert_eq!(Keyboard::Back.rows(), vec![vec![BACK_BUTTON]]);
    }

    #[test]
    fn transcoder_failure_text_depends_on_recipe() {
        let gif = render_outcome(&JobOutcome::Failure {
            recipe: Some(ConversionRecipe::AnimatedGif),
            kind: FailureKind::TranscoderError,
            detail: String::new(),
        });
        assert!(gif.text.contains("GIF"));

        let sticker = render_outcome(&JobOutcome::Failure {
            recipe: Some(ConversionRecipe::LoopingVideoSticker),
            kind: FailureKind::TranscoderError,
            detail: String::new(),
        });
        assert!(sticker.text.contains("file format"));
        assert_eq!(sticker.keyboard, Keyboard::MainMenu);
    }

    #[test]
    fn timeout_has_its_own_text() {
        let reply = render_outcome(&JobOutcome::Failure {
            recipe: Some(ConversionRecipe::LoopingVideoSticker),
            kind: FailureKind::Timeout,
            detail: String::new(),
        });
        assert!(reply.text.starts_with('⌛'));
    }

    #[test]
    fn success_text() {
        let reply = render_outcome(&JobOutcome::Success {
            recipe: ConversionRecipe::AnimatedGif,
            artifact: Artifact {
                bytes: Bytes::from_static(b"GIF89a"),
                filename: "animation.gif".into(),
            },
        });
        assert_eq!(reply.text, "✅ GIF created!");
    }
}
