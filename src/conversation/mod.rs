//! Per-user conversation state machine and the bot controller built on it.

pub mod bot;
pub mod menu;
pub mod session;

pub use bot::StickerBot;
pub use menu::{render_outcome, Keyboard, MenuSelection, Reply, TextInput};
pub use session::SessionStore;
