//! Board construction options.

use crate::error::{BoardError, BoardResult};
use atelier_core::stores::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use serde::Deserialize;
use std::fmt;

/// Largest width or height a board accepts, in pixels.
pub const MAX_DIMENSION: u32 = 16_384;

/// Called with `true` whenever a segment is drawn and `false` when the board is cleared.
pub type DrawingChangeCallback = Box<dyn FnMut(bool)>;

/// Options recognised by a board: its pixel size and the unsaved-changes callback.
pub struct BoardConfig {
    pub width: u32,
    pub height: u32,
    pub on_drawing_change: Option<DrawingChangeCallback>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            on_drawing_change: None,
        }
    }
}

impl fmt::Debug for BoardConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardConfig")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("on_drawing_change", &self.on_drawing_change.is_some())
            .finish()
    }
}

/// The serialisable part of [`BoardConfig`].
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BoardOptions {
    #[serde(default = "default_width")]
    width: u32,
    #[serde(default = "default_height")]
    height: u32,
}

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

impl BoardConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pixel size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the unsaved-changes callback.
    pub fn on_drawing_change(mut self, callback: impl FnMut(bool) + 'static) -> Self {
        self.on_drawing_change = Some(Box::new(callback));
        self
    }

    /// Parse `{"width": .., "height": ..}`. Unknown keys are an error.
    pub fn from_json(json: &str) -> BoardResult<Self> {
        let options: BoardOptions =
            serde_json::from_str(json).map_err(|e| BoardError::InvalidConfig(e.to_string()))?;
        let config = Self::new().with_size(options.width, options.height);
        config.validate()?;
        Ok(config)
    }

    /// Check the dimensions are drawable.
    pub fn validate(&self) -> BoardResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(BoardError::InvalidConfig(format!(
                "board size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(BoardError::InvalidConfig(format!(
                "board size {}x{} exceeds the {}px limit",
                self.width, self.height, MAX_DIMENSION
            )));
        }
        Ok(())
    }
}
