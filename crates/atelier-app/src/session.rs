//! A practice session: the shared stores plus the board they drive.

use crate::actions::UiAction;
use atelier_board::{Board, BoardConfig, BoardError, DrawingSurface, FallbackBoard};
use atelier_core::stores::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use atelier_core::{
    CanvasState, CanvasStore, HistoryStore, PointerEvent, PracticeMode, ToolState, ToolStateError,
    ToolStore,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid app config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("Invalid initial tool settings: {0}")]
    Tools(#[from] ToolStateError),
    #[error(transparent)]
    Board(#[from] BoardError),
}

pub type AppResult<T> = Result<T, AppError>;

/// Session start-up settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct AppConfig {
    pub mode: PracticeMode,
    pub width: u32,
    pub height: u32,
    /// Tool settings to start with instead of the defaults.
    pub tools: Option<ToolState>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mode: PracticeMode::default(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tools: None,
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Owns the canvas, tool and history stores and keeps them in step with a board.
pub struct PracticeSession {
    mode: PracticeMode,
    canvas: CanvasStore,
    tools: ToolStore,
    history: HistoryStore,
    board: Box<dyn Board>,
}

impl PracticeSession {
    /// Start a session on `surface` with fresh stores and a fallback board.
    pub fn new<S: DrawingSurface + 'static>(config: AppConfig, surface: S) -> AppResult<Self> {
        let canvas = CanvasStore::with_state(CanvasState {
            width: config.width,
            height: config.height,
            ..CanvasState::default()
        });
        let tools = config
            .tools
            .clone()
            .map(ToolStore::with_state)
            .unwrap_or_default();
        Self::with_stores(config, surface, canvas, tools, HistoryStore::new())
    }

    /// Start a session with stores shared with other components.
    ///
    /// Fails if the initial tool settings are invalid or the board cannot be built.
    pub fn with_stores<S: DrawingSurface + 'static>(
        config: AppConfig,
        surface: S,
        canvas: CanvasStore,
        tools: ToolStore,
        history: HistoryStore,
    ) -> AppResult<Self> {
        if let Some(initial) = config.tools.clone() {
            initial.validate()?;
            tools.set_tool(initial.tool);
            tools.set_brush_size(initial.brush_size);
            tools.set_brush_color(initial.brush_color);
            tools.set_brush_opacity(initial.brush_opacity);
            tools.set_eraser_size(initial.eraser_size);
        }

        let unsaved = canvas.clone();
        let board_config = BoardConfig::new()
            .with_size(config.width, config.height)
            .on_drawing_change(move |has_changes| unsaved.set_unsaved_changes(has_changes));
        let board = FallbackBoard::with_tool_store(surface, board_config, tools.clone())?;

        canvas.set_size(config.width, config.height);
        log::info!("Practice session started in {} mode", config.mode);

        let session = Self {
            mode: config.mode,
            canvas,
            tools,
            history,
            board: Box::new(board),
        };
        session.sync_from_board();
        Ok(session)
    }

    pub fn mode(&self) -> PracticeMode {
        self.mode
    }

    pub fn canvas(&self) -> &CanvasStore {
        &self.canvas
    }

    pub fn tools(&self) -> &ToolStore {
        &self.tools
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn board(&self) -> &dyn Board {
        self.board.as_ref()
    }

    /// Forward a pointer event and mirror the drawing flag into the canvas store.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        self.board.handle_pointer_event(event);
        self.canvas.set_drawing(self.board.is_drawing());
    }

    /// Run a toolbar action, then re-sync history and zoom from the board.
    ///
    /// A successful save or download marks the drawing as saved.
    pub fn apply(&mut self, action: UiAction) -> AppResult<Option<String>> {
        log::debug!("Applying {:?}", action);
        let is_export = action.is_export();
        let is_tool_change = action.is_tool_change();
        let result = action.apply(self.board.as_mut());
        // Tool settings never move history or zoom.
        if !is_tool_change {
            self.sync_from_board();
        }

        let output = result?;
        if is_export {
            self.canvas.set_unsaved_changes(false);
        }
        Ok(output)
    }

    /// Detach the board from its surface. The stores stay usable.
    pub fn dispose(&mut self) {
        self.board.dispose();
        self.canvas.set_drawing(false);
    }

    fn sync_from_board(&self) {
        self.history.set_can_undo(self.board.can_undo());
        self.history.set_can_redo(self.board.can_redo());
        self.canvas.set_zoom(self.board.zoom_percentage() / 100.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_board::{HeadlessSurface, ImageFormat};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn session() -> PracticeSession {
        PracticeSession::new(AppConfig::default(), HeadlessSurface::new()).unwrap()
    }

    fn draw(session: &mut PracticeSession) {
        session.handle_pointer_event(PointerEvent::down(10.0, 10.0));
        session.handle_pointer_event(PointerEvent::moved(50.0, 50.0));
        session.handle_pointer_event(PointerEvent::up(50.0, 50.0));
    }

    #[test]
    fn test_config_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.mode, PracticeMode::SketchFromImage);
        assert_eq!((config.width, config.height), (800, 600));
    }

    #[test]
    fn test_config_from_json() {
        let json = r##"{
            "mode": "blind-memory",
            "width": 1024,
            "tools": {"brushColor": "#336699", "brushSize": 3.0}
        }"##;
        let config = AppConfig::from_json(json).unwrap();
        assert_eq!(config.mode, PracticeMode::BlindMemory);
        assert_eq!(config.width, 1024);
        let tools = config.tools.unwrap();
        assert_eq!(tools.brush_color, "#336699");
        assert_eq!(tools.tool, "brush");
    }

    #[test]
    fn test_config_rejects_unknown_keys() {
        let err = AppConfig::from_json(r#"{"theme": "dark"}"#).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_invalid_initial_tools_rejected() {
        let json = r#"{"tools": {"brushColor": "not-a-color", "brushSize": -3.0}}"#;
        let config = AppConfig::from_json(json).unwrap();
        let result = PracticeSession::new(config, HeadlessSurface::new());
        assert!(matches!(result, Err(AppError::Tools(ToolStateError::BrushSize(_)))));

        let config = AppConfig::from_json(r#"{"tools": {"brushColor": "not-a-color"}}"#).unwrap();
        let tools = ToolStore::new();
        let result = PracticeSession::with_stores(
            config,
            HeadlessSurface::new(),
            CanvasStore::new(),
            tools.clone(),
            HistoryStore::new(),
        );
        assert!(matches!(result, Err(AppError::Tools(ToolStateError::BrushColor(_)))));
        // The shared store is left untouched.
        assert_eq!(tools.state(), ToolState::default());
    }

    #[test]
    fn test_session_fails_without_context() {
        let result = PracticeSession::new(AppConfig::default(), HeadlessSurface::unavailable());
        assert!(matches!(result, Err(AppError::Board(BoardError::SurfaceUnavailable))));
    }

    #[test]
    fn test_initial_state_synced() {
        let config = AppConfig {
            width: 640,
            height: 480,
            tools: Some(ToolState {
                brush_size: 8.0,
                ..ToolState::default()
            }),
            ..AppConfig::default()
        };
        let session = PracticeSession::new(config, HeadlessSurface::new()).unwrap();

        let canvas = session.canvas().state();
        assert_eq!((canvas.width, canvas.height), (640, 480));
        assert!((canvas.zoom - 1.0).abs() < f64::EPSILON);
        assert!((session.tools().state().brush_size - 8.0).abs() < f64::EPSILON);
        assert!(!session.history().state().can_undo);
    }

    #[test]
    fn test_drawing_flag_mirrored() {
        let mut session = session();
        session.handle_pointer_event(PointerEvent::down(10.0, 10.0));
        assert!(session.canvas().state().is_drawing);
        session.handle_pointer_event(PointerEvent::Leave);
        assert!(!session.canvas().state().is_drawing);
    }

    #[test]
    fn test_unsaved_changes_follow_board() {
        let mut session = session();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        session
            .canvas()
            .subscribe(move |state| sink.borrow_mut().push(state.has_unsaved_changes));

        draw(&mut session);
        assert!(session.canvas().state().has_unsaved_changes);

        session.apply(UiAction::Clear).unwrap();
        assert!(!session.canvas().state().has_unsaved_changes);

        draw(&mut session);
        session
            .apply(UiAction::Download {
                format: ImageFormat::Png,
                filename: None,
            })
            .unwrap();
        assert!(!session.canvas().state().has_unsaved_changes);
        assert!(seen.borrow().contains(&true));
    }

    #[test]
    fn test_shared_tool_store() {
        let tools = ToolStore::new();
        let mut session = PracticeSession::with_stores(
            AppConfig::default(),
            HeadlessSurface::new(),
            CanvasStore::new(),
            tools.clone(),
            HistoryStore::new(),
        )
        .unwrap();

        session.apply(UiAction::SetBrushSize(14.0)).unwrap();
        assert!((tools.state().brush_size - 14.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_history_and_zoom_stay_at_fallback_values() {
        let mut session = session();
        draw(&mut session);
        for action in [UiAction::Undo, UiAction::Redo, UiAction::ZoomIn, UiAction::ZoomOut] {
            session.apply(action).unwrap();
        }
        let history = session.history().state();
        assert!(!history.can_undo);
        assert!(!history.can_redo);
        assert!((session.canvas().state().zoom - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_dispose_stops_drawing() {
        let mut session = session();
        session.handle_pointer_event(PointerEvent::down(10.0, 10.0));
        session.dispose();
        assert!(!session.canvas().state().is_drawing);

        draw(&mut session);
        assert!(!session.canvas().state().has_unsaved_changes);
        assert!(!session.board().is_drawing());
    }
}
