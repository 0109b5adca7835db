//! Per-user pending-mode tracking.
//!
//! Holds, for each session, which conversion the user picked from the menu
//! and the bot is now waiting media for. Writes are last-write-wins; a
//! session with no entry is in [`PendingMode::None`].

use dashmap::DashMap;
use std::sync::Arc;
use stk_core::{PendingMode, SessionId};

/// Thread-safe store of pending modes, cheap to clone and share.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    modes: Arc<DashMap<SessionId, PendingMode>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the session's pending mode.
    pub fn set_pending(&self, session: SessionId, mode: PendingMode) {
        let previous = if mode.is_pending() {
            self.modes.insert(session, mode)
        } else {
            self.modes.remove(&session).map(|(_, m)| m)
        };
        tracing::debug!(
            session = %session,
            previous = %previous.unwrap_or_default(),
            mode = %mode,
            "Pending mode set"
        );
    }

    /// Reset the session to [`PendingMode::None`]. Idempotent.
    pub fn clear(&self, session: SessionId) {
        if self.modes.remove(&session).is_some() {
            tracing::debug!(session = %session, "Pending mode cleared");
        }
    }

    /// Current pending mode; [`PendingMode::None`] for unknown sessions.
    pub fn get_pending(&self, session: SessionId) -> PendingMode {
        self.modes
            .get(&session)
            .map(|m| *m.value())
            .unwrap_or_default()
    }

    /// Number of sessions with a pending conversion.
    pub fn pending_count(&self) -> usize {
        self.modes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: SessionId = SessionId::new(1);
    const BOB: SessionId = SessionId::new(2);

    #[test]
    fn unknown_session_is_none() {
        let store = SessionStore::new();
        assert_eq!(store.get_pending(ALICE), PendingMode::None);
    }

    #[test]
    fn last_write_wins() {
        let store = SessionStore::new();
        store.set_pending(ALICE, PendingMode::AwaitingImage);
        store.set_pending(ALICE, PendingMode::AwaitingAnimationSource);
        assert_eq!(store.get_pending(ALICE), PendingMode::AwaitingAnimationSource);
        assert_eq!(store.pending_count(), 1);
    }

    #[test]
    fn clear_is_idempotent() {
        let store = SessionStore::new();
        store.set_pending(ALICE, PendingMode::AwaitingLoopStickerSource);
        store.clear(ALICE);
        store.clear(ALICE);
        assert_eq!(store.get_pending(ALICE), PendingMode::None);
        assert_eq!(store.pending_count(), 0);
    }

    #[test]
    fn setting_none_drops_the_entry() {
        let store = SessionStore::new();
        store.set_pending(ALICE, PendingMode::AwaitingImage);
        store.set_pending(ALICE, PendingMode::None);
        assert_eq!(store.pending_count(), 0);
    }

    #[test]
    fn sessions_are_independent() {
        let store = SessionStore::new();
        store.set_pending(ALICE, PendingMode::AwaitingImage);
        store.set_pending(BOB, PendingMode::AwaitingAnimationSource);
        store.clear(ALICE);
        assert_eq!(store.get_pending(ALICE), PendingMode::None);
        assert_eq!(store.get_pending(BOB), PendingMode::AwaitingAnimationSource);
    }

    #[test]
    fn clones_share_state() {
        let store = SessionStore::new();
        let other = store.clone();
        other.set_pending(ALICE, PendingMode::AwaitingImage);
        assert_eq!(store.get_pending(ALICE), PendingMode::AwaitingImage);
    }
}
