//! Practice modes a drawing session can run in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown practice mode: {0}")]
pub struct UnknownPracticeMode(pub String);

/// What the user is practising.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PracticeMode {
    /// Copy a reference image shown next to the canvas.
    #[default]
    SketchFromImage,
    /// Draw from a written description.
    SketchFromDescription,
    /// Study a reference, then draw it from memory with the reference hidden.
    BlindMemory,
    /// Portrait drawing with other players. Synchronization lives outside this crate.
    MultiplayerPortrait,
}

impl PracticeMode {
    pub const ALL: [PracticeMode; 4] = [
        PracticeMode::SketchFromImage,
        PracticeMode::SketchFromDescription,
        PracticeMode::BlindMemory,
        PracticeMode::MultiplayerPortrait,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            PracticeMode::SketchFromImage => "sketch-from-image",
            PracticeMode::SketchFromDescription => "sketch-from-description",
            PracticeMode::BlindMemory => "blind-memory",
            PracticeMode::MultiplayerPortrait => "multiplayer-portrait",
        }
    }

    /// Get display name for this mode.
    pub fn title(self) -> &'static str {
        match self {
            PracticeMode::SketchFromImage => "Sketch from Image",
            PracticeMode::SketchFromDescription => "Sketch from Description",
            PracticeMode::BlindMemory => "Blind Memory Study",
            PracticeMode::MultiplayerPortrait => "Multiplayer Portrait",
        }
    }

    pub fn requires_reference(self) -> bool {
        matches!(
            self,
            PracticeMode::SketchFromImage | PracticeMode::SketchFromDescription
        )
    }

    pub fn hides_canvas_while_studying(self) -> bool {
        matches!(self, PracticeMode::BlindMemory)
    }

    pub fn is_multiplayer(self) -> bool {
        matches!(self, PracticeMode::MultiplayerPortrait)
    }
}

impl fmt::Display for PracticeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for PracticeMode {
    type Err = UnknownPracticeMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PracticeMode::ALL
            .into_iter()
            .find(|mode| mode.slug() == s.trim())
            .ok_or_else(|| UnknownPracticeMode(s.to_string()))
    }
}
