//! Tool settings read by the board before each stroke segment.

use super::is_valid_size;
use super::observable::{Store, SubscriptionId};
use crate::color::{ColorParseError, Rgba8};
use crate::tools::ToolKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_TOOL: &str = "brush";
pub const DEFAULT_BRUSH_SIZE: f64 = 5.0;
pub const DEFAULT_BRUSH_COLOR: &str = "#000000";
pub const DEFAULT_ERASER_SIZE: f64 = 20.0;

/// Largest brush or eraser size, in pixels. Matches the largest board side.
pub const MAX_TOOL_SIZE: f64 = 16_384.0;

/// Why a [`ToolState`] cannot be drawn with.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolStateError {
    #[error("Invalid brush size: {0}")]
    BrushSize(f64),
    #[error("Invalid eraser size: {0}")]
    EraserSize(f64),
    #[error("Invalid brush opacity: {0}")]
    BrushOpacity(f64),
    #[error("Invalid brush color: {0}")]
    BrushColor(#[from] ColorParseError),
}

/// Active tool and brush settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToolState {
    /// Free-form tool identifier, e.g. "brush" or "eraser".
    pub tool: String,
    pub brush_size: f64,
    /// Color string as entered in the toolbar.
    pub brush_color: String,
    /// Brush opacity (0.0 = invisible, 1.0 = opaque).
    pub brush_opacity: f64,
    pub eraser_size: f64,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            tool: DEFAULT_TOOL.to_string(),
            brush_size: DEFAULT_BRUSH_SIZE,
            brush_color: DEFAULT_BRUSH_COLOR.to_string(),
            brush_opacity: 1.0,
            eraser_size: DEFAULT_ERASER_SIZE,
        }
    }
}

impl ToolState {
    /// How a board should interpret the tool identifier.
    pub fn kind(&self) -> ToolKind {
        ToolKind::from_id(&self.tool)
    }

    /// Line width for the active tool.
    pub fn active_size(&self) -> f64 {
        match self.kind() {
            ToolKind::Eraser => self.eraser_size,
            ToolKind::Brush => self.brush_size,
        }
    }

    /// Check every setting is one the setters would accept.
    pub fn validate(&self) -> Result<(), ToolStateError> {
        if !is_valid_size(self.brush_size) {
            return Err(ToolStateError::BrushSize(self.brush_size));
        }
        if !is_valid_size(self.eraser_size) {
            return Err(ToolStateError::EraserSize(self.eraser_size));
        }
        if !(0.0..=1.0).contains(&self.brush_opacity) {
            return Err(ToolStateError::BrushOpacity(self.brush_opacity));
        }
        Rgba8::parse(&self.brush_color)?;
        Ok(())
    }
}

/// Store holding [`ToolState`].
#[derive(Debug, Clone, Default)]
pub struct ToolStore {
    store: Store<ToolState>,
}

impl ToolStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: ToolState) -> Self {
        Self {
            store: Store::new(state),
        }
    }

    pub fn state(&self) -> ToolState {
        self.store.get()
    }

    pub fn set_tool(&self, tool: impl Into<String>) {
        let tool = tool.into();
        self.store.update(|s| s.tool = tool);
    }

    /// Returns false (and leaves the state alone) for sizes outside `0 < size <= MAX_TOOL_SIZE`.
    pub fn set_brush_size(&self, size: f64) -> bool {
        if !is_valid_size(size) {
            log::warn!("Ignoring invalid brush size {}", size);
            return false;
        }
        self.store.update(|s| s.brush_size = size);
        true
    }

    pub fn set_brush_color(&self, color: impl Into<String>) {
        let color = color.into();
        self.store.update(|s| s.brush_color = color);
    }

    /// Opacity is clamped into 0..=1; NaN is rejected.
    pub fn set_brush_opacity(&self, opacity: f64) -> bool {
        if opacity.is_nan() {
            log::warn!("Ignoring NaN brush opacity");
            return false;
        }
        let opacity = opacity.clamp(0.0, 1.0);
        self.store.update(|s| s.brush_opacity = opacity);
        true
    }

    pub fn set_eraser_size(&self, size: f64) -> bool {
        if !is_valid_size(size) {
            log::warn!("Ignoring invalid eraser size {}", size);
            return false;
        }
        self.store.update(|s| s.eraser_size = size);
        true
    }

    pub fn reset(&self) {
        self.store.set(ToolState::default());
    }

    pub fn subscribe(&self, subscriber: impl Fn(&ToolState) + 'static) -> SubscriptionId {
        self.store.subscribe(subscriber)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_defaults() {
        let state = ToolStore::new().state();
        assert_eq!(state.tool, "brush");
        assert!((state.brush_size - 5.0).abs() < f64::EPSILON);
        assert_eq!(state.brush_color, "#000000");
        assert!((state.brush_opacity - 1.0).abs() < f64::EPSILON);
        assert!((state.eraser_size - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_setters() {
        let store = ToolStore::new();
        store.set_tool("eraser");
        assert!(store.set_brush_size(12.0));
        store.set_brush_color("#ff0000");
        assert!(store.set_brush_opacity(0.25));
        assert!(store.set_eraser_size(40.0));

        let state = store.state();
        assert_eq!(state.tool, "eraser");
        assert_eq!(state.kind(), ToolKind::Eraser);
        assert!((state.brush_size - 12.0).abs() < f64::EPSILON);
        assert_eq!(state.brush_color, "#ff0000");
        assert!((state.brush_opacity - 0.25).abs() < f64::EPSILON);
        assert!((state.active_size() - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_free_form_tool_kept_verbatim() {
        let store = ToolStore::new();
        store.set_tool("Charcoal");
        assert_eq!(store.state().tool, "Charcoal");
        assert_eq!(store.state().kind(), ToolKind::Brush);
    }

    #[test]
    fn test_invalid_sizes_rejected() {
        let store = ToolStore::new();
        assert!(!store.set_brush_size(0.0));
        assert!(!store.set_brush_size(-3.0));
        assert!(!store.set_brush_size(f64::INFINITY));
        assert!(!store.set_eraser_size(f64::NAN));
        assert_eq!(store.state(), ToolState::default());
    }

    #[test]
    fn test_oversized_sizes_rejected() {
        let store = ToolStore::new();
        assert!(!store.set_brush_size(1e300));
        assert!(!store.set_eraser_size(MAX_TOOL_SIZE + 1.0));
        assert!(store.set_brush_size(MAX_TOOL_SIZE));
        assert!((store.state().brush_size - MAX_TOOL_SIZE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate() {
        assert_eq!(ToolState::default().validate(), Ok(()));

        let state = ToolState {
            brush_size: -3.0,
            ..ToolState::default()
        };
        assert_eq!(state.validate(), Err(ToolStateError::BrushSize(-3.0)));

        let state = ToolState {
            eraser_size: 1e300,
            ..ToolState::default()
        };
        assert_eq!(state.validate(), Err(ToolStateError::EraserSize(1e300)));

        let state = ToolState {
            brush_opacity: 1.5,
            ..ToolState::default()
        };
        assert_eq!(state.validate(), Err(ToolStateError::BrushOpacity(1.5)));

        let state = ToolState {
            brush_color: "not-a-color".to_string(),
            ..ToolState::default()
        };
        assert!(matches!(state.validate(), Err(ToolStateError::BrushColor(_))));
    }

    #[test]
    fn test_opacity_clamped() {
        let store = ToolStore::new();
        store.set_brush_opacity(1.5);
        assert!((store.state().brush_opacity - 1.0).abs() < f64::EPSILON);
        store.set_brush_opacity(-0.5);
        assert!((store.state().brush_opacity).abs() < f64::EPSILON);
        assert!(!store.set_brush_opacity(f64::NAN));
    }

    #[test]
    fn test_reset_notifies() {
        let store = ToolStore::new();
        store.set_brush_size(9.0);

        let notified = Rc::new(Cell::new(false));
        let n = Rc::clone(&notified);
        store.subscribe(move |state| {
            n.set((state.brush_size - DEFAULT_BRUSH_SIZE).abs() < f64::EPSILON)
        });

        store.reset();
        assert!(notified.get());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let state: ToolState = serde_json::from_str(r#"{"brushColor":"red"}"#).unwrap();
        assert_eq!(state.brush_color, "red");
        assert_eq!(state.tool, "brush");
    }
}
