//! Canvas geometry and drawing flags.

use super::observable::{Store, SubscriptionId};
use serde::{Deserialize, Serialize};

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;

/// Canvas geometry plus the drawing-in-progress and unsaved-changes flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasState {
    pub width: u32,
    pub height: u32,
    /// Zoom factor (1.0 = 100%).
    pub zoom: f64,
    pub is_drawing: bool,
    pub has_unsaved_changes: bool,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            zoom: 1.0,
            is_drawing: false,
            has_unsaved_changes: false,
        }
    }
}

/// Store holding [`CanvasState`].
#[derive(Debug, Clone, Default)]
pub struct CanvasStore {
    store: Store<CanvasState>,
}

impl CanvasStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: CanvasState) -> Self {
        Self {
            store: Store::new(state),
        }
    }

    pub fn state(&self) -> CanvasState {
        self.store.get()
    }

    pub fn set_size(&self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("Ignoring empty canvas size {}x{}", width, height);
            return;
        }
        self.store.update(|s| {
            s.width = width;
            s.height = height;
        });
    }

    pub fn set_zoom(&self, zoom: f64) {
        if !zoom.is_finite() || zoom <= 0.0 {
            log::warn!("Ignoring invalid zoom factor {}", zoom);
            return;
        }
        self.store.update(|s| s.zoom = zoom);
    }

    pub fn set_drawing(&self, is_drawing: bool) {
        self.store.update(|s| s.is_drawing = is_drawing);
    }

    pub fn set_unsaved_changes(&self, has_unsaved_changes: bool) {
        self.store.update(|s| s.has_unsaved_changes = has_unsaved_changes);
    }

    /// Restore every field to its default.
    pub fn reset(&self) {
        self.store.set(CanvasState::default());
    }

    pub fn subscribe(&self, subscriber: impl Fn(&CanvasState) + 'static) -> SubscriptionId {
        self.store.subscribe(subscriber)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = CanvasStore::new().state();
        assert_eq!(state.width, 800);
        assert_eq!(state.height, 600);
        assert!((state.zoom - 1.0).abs() < f64::EPSILON);
        assert!(!state.is_drawing);
        assert!(!state.has_unsaved_changes);
    }

    #[test]
    fn test_setters() {
        let store = CanvasStore::new();
        store.set_size(1024, 768);
        store.set_zoom(2.5);
        store.set_drawing(true);
        store.set_unsaved_changes(true);

        let state = store.state();
        assert_eq!((state.width, state.height), (1024, 768));
        assert!((state.zoom - 2.5).abs() < f64::EPSILON);
        assert!(state.is_drawing);
        assert!(state.has_unsaved_changes);
    }

    #[test]
    fn test_invalid_values_ignored() {
        let store = CanvasStore::new();
        store.set_size(0, 100);
        store.set_zoom(0.0);
        store.set_zoom(f64::NAN);

        let state = store.state();
        assert_eq!((state.width, state.height), (800, 600));
        assert!((state.zoom - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reset() {
        let store = CanvasStore::new();
        store.set_size(10, 10);
        store.set_unsaved_changes(true);
        store.reset();
        assert_eq!(store.state(), CanvasState::default());
    }

    #[test]
    fn test_camel_case_snapshot() {
        let json = serde_json::to_value(CanvasState::default()).unwrap();
        assert_eq!(json["hasUnsavedChanges"], false);
        assert_eq!(json["isDrawing"], false);
    }
}
