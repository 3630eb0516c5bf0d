//! Keyboard shortcut registry.

use crate::actions::UiAction;
use atelier_board::ImageFormat;
use atelier_core::ToolKind;

/// A keyboard shortcut definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+S").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    /// Whether a key press matches this shortcut. Letter keys ignore case.
    pub fn matches(&self, key: &str, ctrl: bool, shift: bool) -> bool {
        self.ctrl == ctrl && self.shift == shift && self.key.eq_ignore_ascii_case(key)
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("B", false, false, "Brush"),
            Shortcut::new("E", false, false, "Eraser"),
            Shortcut::new("Z", true, false, "Undo"),
            Shortcut::new("Z", true, true, "Redo"),
            Shortcut::new("Y", true, false, "Redo"),
            Shortcut::new("S", true, false, "Download as PNG"),
            Shortcut::new("Delete", false, false, "Clear the board"),
            Shortcut::new("+", false, false, "Zoom in"),
            Shortcut::new("=", false, false, "Zoom in"),
            Shortcut::new("-", false, false, "Zoom out"),
            Shortcut::new("0", false, false, "Reset zoom"),
        ]
    }

    /// Action for a key press, if it is a registered shortcut.
    pub fn action_for(key: &str, ctrl: bool, shift: bool) -> Option<UiAction> {
        let shortcut = Self::all()
            .into_iter()
            .find(|shortcut| shortcut.matches(key, ctrl, shift))?;

        let action = match (shortcut.key, shortcut.shift) {
            ("B", _) => UiAction::SetTool(ToolKind::Brush.id().to_string()),
            ("E", _) => UiAction::SetTool(ToolKind::Eraser.id().to_string()),
            ("Z", false) => UiAction::Undo,
            ("Z", true) | ("Y", _) => UiAction::Redo,
            ("S", _) => UiAction::Download {
                format: ImageFormat::Png,
                filename: None,
            },
            ("Delete", _) => UiAction::Clear,
            ("+", _) | ("=", _) => UiAction::ZoomIn,
            ("-", _) => UiAction::ZoomOut,
            ("0", _) => UiAction::ZoomReset,
            _ => return None,
        };
        Some(action)
    }

    /// One line per shortcut, for help overlays.
    pub fn help_text() -> String {
        Self::all()
            .iter()
            .map(|shortcut| format!("{:12} {}", shortcut.format(), shortcut.description))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
