//! Stickerforge - turns photos and videos into Telegram stickers and GIFs.
//!
//! This library crate exposes the conversation layer for the binary and
//! for integration testing.

pub mod conversation;
pub mod pipeline;
pub mod transport;

pub use conversation::{StickerBot, SessionStore};
pub use transport::{LocalTransport, Transport};
