//! Shared state stores.
//!
//! Three independent containers coordinate UI components and boards: canvas
//! geometry, tool settings and the history pointer. None of them enforce
//! cross-store invariants; the caller keeps them consistent with the board.

mod canvas;
mod history;
mod observable;
mod tool;

pub use canvas::{CanvasState, CanvasStore, DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use history::{HistoryState, HistoryStore, MAX_HISTORY_SIZE};
pub use observable::{Store, SubscriptionId};
pub use tool::{
    DEFAULT_BRUSH_COLOR, DEFAULT_BRUSH_SIZE, DEFAULT_ERASER_SIZE, DEFAULT_TOOL, MAX_TOOL_SIZE,
    ToolState, ToolStateError, ToolStore,
};

/// True for sizes a brush or eraser can actually draw with.
pub(crate) fn is_valid_size(size: f64) -> bool {
    size.is_finite() && size > 0.0 && size <= MAX_TOOL_SIZE
}
