//! Tool identifiers understood by the drawing boards.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tool behaviours a board can apply to a stroke.
///
/// The tool store keeps a free-form identifier; this is what a board makes of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Brush,
    Eraser,
}

impl ToolKind {
    /// Interpret a free-form tool identifier.
    ///
    /// Unknown identifiers paint like the brush.
    pub fn from_id(id: &str) -> Self {
        match id.trim().to_ascii_lowercase().as_str() {
            "eraser" | "erase" | "rubber" => ToolKind::Eraser,
            "brush" | "pen" | "pencil" | "marker" => ToolKind::Brush,
            other => {
                log::debug!("Unknown tool '{}', drawing with the brush", other);
                ToolKind::Brush
            }
        }
    }

    /// Canonical identifier.
    pub fn id(self) -> &'static str {
        match self {
            ToolKind::Brush => "brush",
            ToolKind::Eraser => "eraser",
        }
    }

    pub fn is_eraser(self) -> bool {
        matches!(self, ToolKind::Eraser)
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
