//! Toolbar commands.

use atelier_board::{Board, BoardResult, ImageFormat};

/// Actions triggered by the toolbar or a keyboard shortcut.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// Change the current tool by identifier.
    SetTool(String),
    SetBrushSize(f64),
    /// Change the brush color (any CSS-style color string).
    SetBrushColor(String),
    SetBrushOpacity(f64),
    SetEraserSize(f64),
    /// Wipe the board.
    Clear,
    /// Save the board as a PNG data URI.
    Save,
    /// Download the board as an image file.
    Download {
        format: ImageFormat,
        filename: Option<String>,
    },
    Undo,
    Redo,
    ZoomIn,
    ZoomOut,
    /// Reset zoom to 100%.
    ZoomReset,
}

impl UiAction {
    /// Run the action against `board`.
    ///
    /// Returns the data URI for [`UiAction::Save`] and `None` otherwise.
    pub fn apply(self, board: &mut dyn Board) -> BoardResult<Option<String>> {
        match self {
            UiAction::SetTool(tool) => board.set_tool(&tool),
            UiAction::SetBrushSize(size) => board.set_brush_size(size),
            UiAction::SetBrushColor(color) => board.set_brush_color(&color),
            UiAction::SetBrushOpacity(opacity) => board.set_brush_opacity(opacity),
            UiAction::SetEraserSize(size) => board.set_eraser_size(size),
            UiAction::Clear => board.clear(),
            UiAction::Save => return board.save().map(Some),
            UiAction::Download { format, filename } => {
                board.download(format, filename.as_deref())?;
            }
            UiAction::Undo => board.undo(),
            UiAction::Redo => board.redo(),
            UiAction::ZoomIn => board.zoom_in(),
            UiAction::ZoomOut => board.zoom_out(),
            UiAction::ZoomReset => board.reset_zoom(),
        }
        Ok(None)
    }

    /// True for actions that only change tool settings.
    pub fn is_tool_change(&self) -> bool {
        matches!(
            self,
            UiAction::SetTool(_)
                | UiAction::SetBrushSize(_)
                | UiAction::SetBrushColor(_)
                | UiAction::SetBrushOpacity(_)
                | UiAction::SetEraserSize(_)
        )
    }

    /// True for actions that persist the drawing.
    pub fn is_export(&self) -> bool {
        matches!(self, UiAction::Save | UiAction::Download { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_board::{BoardConfig, FallbackBoard, HeadlessSurface};
    use atelier_core::PointerEvent;

    fn board() -> FallbackBoard<HeadlessSurface> {
        FallbackBoard::new(HeadlessSurface::new(), BoardConfig::default()).unwrap()
    }

    #[test]
    fn test_tool_actions_reach_store() {
        let mut board = board();
        UiAction::SetTool("eraser".to_string()).apply(&mut board).unwrap();
        UiAction::SetBrushSize(9.0).apply(&mut board).unwrap();
        UiAction::SetBrushColor("red".to_string()).apply(&mut board).unwrap();
        UiAction::SetBrushOpacity(0.25).apply(&mut board).unwrap();
        UiAction::SetEraserSize(40.0).apply(&mut board).unwrap();

        let state = board.tool_store().state();
        assert_eq!(state.tool, "eraser");
        assert!((state.brush_size - 9.0).abs() < f64::EPSILON);
        assert_eq!(state.brush_color, "red");
        assert!((state.brush_opacity - 0.25).abs() < f64::EPSILON);
        assert!((state.eraser_size - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_save_returns_data_uri() {
        let mut board = board();
        let uri = UiAction::Save.apply(&mut board).unwrap();
        assert!(uri.unwrap().starts_with("data:image/png;base64,"));
        assert_eq!(UiAction::Clear.apply(&mut board).unwrap(), None);
    }

    #[test]
    fn test_download_action() {
        let mut board = board();
        UiAction::Download {
            format: ImageFormat::Jpeg,
            filename: Some("study".to_string()),
        }
        .apply(&mut board)
        .unwrap();
        assert_eq!(board.surface().downloads()[0].filename, "study.jpg");
    }

    #[test]
    fn test_clear_action_wipes_board() {
        let mut board = board();
        board.handle_pointer_event(PointerEvent::down(10.0, 10.0));
        board.handle_pointer_event(PointerEvent::moved(60.0, 60.0));
        board.handle_pointer_event(PointerEvent::up(60.0, 60.0));
        assert!(!board.context().is_blank());

        UiAction::Clear.apply(&mut board).unwrap();
        assert!(board.context().is_blank());
    }

    #[test]
    fn test_classification() {
        assert!(UiAction::SetBrushSize(3.0).is_tool_change());
        assert!(!UiAction::Clear.is_tool_change());
        assert!(UiAction::Save.is_export());
        assert!(!UiAction::Undo.is_export());
    }
}
