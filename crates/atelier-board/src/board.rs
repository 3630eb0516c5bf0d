//! The board command surface and the fallback raster board.

use crate::config::{BoardConfig, DrawingChangeCallback};
use crate::error::{BoardError, BoardResult};
use crate::export::{self, ImageFormat};
use crate::raster::{RasterContext, SegmentStyle};
use crate::surface::{Download, DrawingSurface, ListenerId};
use atelier_core::input::to_canvas;
use atelier_core::{PointerEvent, PointerEventKind, Rgba8, Stroke, ToolKind, ToolState, ToolStore};
use kurbo::Point;
use std::path::Path;

/// Base name used when a download has no caller-supplied file name.
const DEFAULT_DOWNLOAD_NAME: &str = "drawing";

/// Commands every drawing board accepts.
///
/// The fallback board implements the drawing half and answers the history and
/// zoom half with no-ops, so toolbars can be written once against this trait.
pub trait Board {
    fn set_tool(&mut self, tool: &str);
    fn set_brush_size(&mut self, size: f64);
    fn set_brush_color(&mut self, color: &str);
    fn set_brush_opacity(&mut self, opacity: f64);
    fn set_eraser_size(&mut self, size: f64);

    /// Feed one pointer event from the surface.
    fn handle_pointer_event(&mut self, event: PointerEvent);

    /// Whether a stroke is in progress.
    fn is_drawing(&self) -> bool;

    /// Wipe the whole surface.
    fn clear(&mut self);

    /// Current content as a PNG data URI.
    fn save(&self) -> BoardResult<String>;

    /// Hand the current content to the surface as a file download.
    fn download(&mut self, format: ImageFormat, filename: Option<&str>) -> BoardResult<()>;

    fn undo(&mut self);
    fn redo(&mut self);
    fn can_undo(&self) -> bool;
    fn can_redo(&self) -> bool;

    fn zoom_in(&mut self);
    fn zoom_out(&mut self);
    fn reset_zoom(&mut self);
    /// Zoom level in percent.
    fn zoom_percentage(&self) -> f64;

    /// Detach all input listeners.
    fn dispose(&mut self);
}

/// Minimal raster board used when the rich canvas engine is unavailable.
///
/// Strokes are drawn straight onto the raster as a polyline at native event
/// resolution. There is no history and no view transform.
pub struct FallbackBoard<S: DrawingSurface> {
    surface: S,
    context: RasterContext,
    tools: ToolStore,
    on_drawing_change: Option<DrawingChangeCallback>,
    listeners: Vec<(PointerEventKind, ListenerId)>,
    is_drawing: bool,
    last_point: Option<Point>,
    current_stroke: Option<Stroke>,
    strokes: Vec<Stroke>,
}

impl<S: DrawingSurface> FallbackBoard<S> {
    /// Create a board with its own tool store.
    pub fn new(surface: S, config: BoardConfig) -> BoardResult<Self> {
        Self::with_tool_store(surface, config, ToolStore::new())
    }

    /// Create a board that reads brush settings from a shared tool store.
    ///
    /// Fails if the configuration is invalid or the surface has no 2D context.
    pub fn with_tool_store(
        mut surface: S,
        config: BoardConfig,
        tools: ToolStore,
    ) -> BoardResult<Self> {
        config.validate()?;

        let context = surface
            .acquire_context(config.width, config.height)
            .ok_or(BoardError::SurfaceUnavailable)?;

        let listeners = PointerEventKind::ALL
            .into_iter()
            .map(|kind| (kind, surface.add_listener(kind)))
            .collect();

        log::info!("Fallback board ready ({}x{})", config.width, config.height);

        Ok(Self {
            surface,
            context,
            tools,
            on_drawing_change: config.on_drawing_change,
            listeners,
            is_drawing: false,
            last_point: None,
            current_stroke: None,
            strokes: Vec::new(),
        })
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The raster the board draws into.
    pub fn context(&self) -> &RasterContext {
        &self.context
    }

    /// The tool store read before each segment.
    pub fn tool_store(&self) -> &ToolStore {
        &self.tools
    }

    /// Completed strokes since construction or the last clear.
    ///
    /// The log grows with every stroke; only [`Board::clear`] empties it.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn is_disposed(&self) -> bool {
        self.listeners.is_empty()
    }

    fn is_listening(&self, kind: PointerEventKind) -> bool {
        self.listeners.iter().any(|(k, _)| *k == kind)
    }

    fn notify_drawing_change(&mut self, has_changes: bool) {
        if let Some(callback) = self.on_drawing_change.as_mut() {
            callback(has_changes);
        }
    }

    fn segment_style(tools: &ToolState) -> SegmentStyle {
        let width = tools.active_size();
        if tools.kind().is_eraser() {
            return SegmentStyle::erase(width);
        }
        let color = Rgba8::parse(&tools.brush_color)
            .unwrap_or_default()
            .with_opacity(tools.brush_opacity);
        SegmentStyle::paint(width, color)
    }

    fn begin_stroke(&mut self, client: Point) {
        // A down without an up (e.g. a lost pointer capture) closes the open stroke.
        self.end_stroke();

        let start = to_canvas(client, self.surface.bounding_rect());
        let tools = self.tools.state();
        if tools.kind() == ToolKind::Brush {
            if let Err(e) = Rgba8::parse(&tools.brush_color) {
                log::warn!("{}; drawing in black", e);
            }
        }

        let style = Self::segment_style(&tools);
        self.is_drawing = true;
        self.last_point = Some(start);
        self.current_stroke = Some(Stroke::begin(start, style.width, style.color, tools.kind()));
        log::debug!("Stroke started at ({:.1}, {:.1})", start.x, start.y);
    }

    fn continue_stroke(&mut self, client: Point) {
        if !self.is_drawing {
            return;
        }
        let Some(from) = self.last_point else {
            return;
        };

        let to = to_canvas(client, self.surface.bounding_rect());
        let style = Self::segment_style(&self.tools.state());

        if self.context.stroke_segment(from, to, &style) {
            if let Some(stroke) = self.current_stroke.as_mut() {
                stroke.add_point(to);
            }
            self.notify_drawing_change(true);
        }
        self.last_point = Some(to);
    }

    fn end_stroke(&mut self) {
        if !self.is_drawing {
            return;
        }
        self.is_drawing = false;
        self.last_point = None;

        if let Some(stroke) = self.current_stroke.take() {
            log::debug!("Stroke finished with {} points", stroke.len());
            if stroke.len() >= 2 {
                self.strokes.push(stroke);
            }
        }
    }

    /// Keep the caller's name if its extension already names `format`, else append one.
    fn download_name(filename: Option<&str>, format: ImageFormat) -> String {
        let matches_format = |name: &str| {
            Path::new(name)
                .extension()
                .and_then(|ext| ext.to_str())
                .and_then(ImageFormat::from_extension)
                == Some(format)
        };

        match filename.map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) if matches_format(name) => name.to_string(),
            Some(name) => format!("{}.{}", name, format.extension()),
            None => format!("{}.{}", DEFAULT_DOWNLOAD_NAME, format.extension()),
        }
    }
}

impl<S: DrawingSurface> Board for FallbackBoard<S> {
    fn set_tool(&mut self, tool: &str) {
        self.tools.set_tool(tool);
    }

    fn set_brush_size(&mut self, size: f64) {
        self.tools.set_brush_size(size);
    }

    fn set_brush_color(&mut self, color: &str) {
        match Rgba8::parse(color) {
            Ok(_) => self.tools.set_brush_color(color),
            Err(e) => log::warn!("Ignoring brush color: {}", e),
        }
    }

    fn set_brush_opacity(&mut self, opacity: f64) {
        self.tools.set_brush_opacity(opacity);
    }

    fn set_eraser_size(&mut self, size: f64) {
        self.tools.set_eraser_size(size);
    }

    fn handle_pointer_event(&mut self, event: PointerEvent) {
        if !self.is_listening(event.kind()) {
            return;
        }

        match event {
            PointerEvent::Down { client } => self.begin_stroke(client),
            PointerEvent::Move { client } => self.continue_stroke(client),
            PointerEvent::Up { .. } | PointerEvent::Leave => self.end_stroke(),
        }
    }

    fn is_drawing(&self) -> bool {
        self.is_drawing
    }

    fn clear(&mut self) {
        self.context.clear();
        self.strokes.clear();
        log::info!("Board cleared");
        self.notify_drawing_change(false);
    }

    fn save(&self) -> BoardResult<String> {
        let png_data = export::encode_png(
            &self.context.to_rgba(),
            self.context.width(),
            self.context.height(),
        )?;
        Ok(export::data_uri(ImageFormat::Png.mime_type(), &png_data))
    }

    fn download(&mut self, format: ImageFormat, filename: Option<&str>) -> BoardResult<()> {
        let bytes = export::encode(
            format,
            &self.context.to_rgba(),
            self.context.width(),
            self.context.height(),
        )?;
        let filename = Self::download_name(filename, format);
        log::info!("Downloading {} ({} bytes)", filename, bytes.len());

        self.surface.deliver_download(Download {
            filename,
            mime_type: format.mime_type(),
            bytes,
        })
    }

    fn undo(&mut self) {
        log::info!("Undo is not available on the fallback board");
    }

    fn redo(&mut self) {
        log::info!("Redo is not available on the fallback board");
    }

    fn can_undo(&self) -> bool {
        false
    }

    fn can_redo(&self) -> bool {
        false
    }

    fn zoom_in(&mut self) {
        log::info!("Zoom is not available on the fallback board");
    }

    fn zoom_out(&mut self) {
        log::info!("Zoom is not available on the fallback board");
    }

    fn reset_zoom(&mut self) {
        log::info!("Zoom is not available on the fallback board");
    }

    fn zoom_percentage(&self) -> f64 {
        100.0
    }

    fn dispose(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        for (_, id) in self.listeners.drain(..) {
            self.surface.remove_listener(id);
        }
        self.is_drawing = false;
        self.last_point = None;
        self.current_stroke = None;
        log::info!("Fallback board disposed");
    }
}
