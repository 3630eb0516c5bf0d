//! Undo/redo history pointer.
//!
//! The fallback board keeps no history of its own; this store exists so a
//! full board and the toolbar can agree on what undo and redo would do.

use super::observable::{Store, SubscriptionId};
use serde::{Deserialize, Serialize};

/// Maximum number of undo states to keep.
pub const MAX_HISTORY_SIZE: usize = 50;

const MAX_INDEX: i32 = MAX_HISTORY_SIZE as i32 - 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryState {
    pub can_undo: bool,
    pub can_redo: bool,
    /// -1 when the history is empty.
    pub history_index: i32,
    pub max_history_size: usize,
}

impl Default for HistoryState {
    fn default() -> Self {
        Self {
            can_undo: false,
            can_redo: false,
            history_index: -1,
            max_history_size: MAX_HISTORY_SIZE,
        }
    }
}

/// Store holding [`HistoryState`].
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    store: Store<HistoryState>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> HistoryState {
        self.store.get()
    }

    pub fn set_can_undo(&self, can_undo: bool) {
        self.store.update(|s| s.can_undo = can_undo);
    }

    pub fn set_can_redo(&self, can_redo: bool) {
        self.store.update(|s| s.can_redo = can_redo);
    }

    /// Set the index, clamped into `[-1, MAX_HISTORY_SIZE - 1]`.
    pub fn set_history_index(&self, index: i32) {
        let index = index.clamp(-1, MAX_INDEX);
        self.store.update(|s| {
            s.history_index = index;
            s.can_undo = index > 0;
        });
    }

    /// Record a new action. Clears redo.
    pub fn increment_history(&self) {
        self.store.update(|s| {
            s.history_index = (s.history_index + 1).min(MAX_INDEX);
            s.can_undo = s.history_index > 0;
            s.can_redo = false;
        });
    }

    /// Step back one action. Redo becomes available only if the index moved.
    pub fn decrement_history(&self) {
        self.store.update(|s| {
            let previous = s.history_index;
            s.history_index = (s.history_index - 1).max(-1);
            s.can_undo = s.history_index > 0;
            if s.history_index < previous {
                s.can_redo = true;
            }
        });
    }

    pub fn reset(&self) {
        self.store.set(HistoryState::default());
    }

    pub fn subscribe(&self, subscriber: impl Fn(&HistoryState) + 'static) -> SubscriptionId {
        self.store.subscribe(subscriber)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }
}
