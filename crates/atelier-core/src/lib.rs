//! Atelier Core Library
//!
//! Platform-agnostic data structures and state stores shared by every
//! Atelier drawing board.

pub mod color;
pub mod input;
pub mod practice;
pub mod stores;
pub mod stroke;
pub mod tools;

pub use color::{ColorParseError, Rgba8};
pub use input::{PointerEvent, PointerEventKind};
pub use practice::{PracticeMode, UnknownPracticeMode};
pub use stores::{
    CanvasState, CanvasStore, HistoryState, HistoryStore, MAX_HISTORY_SIZE, Store,
    SubscriptionId, ToolState, ToolStateError, ToolStore,
};
pub use stroke::Stroke;
pub use tools::ToolKind;
