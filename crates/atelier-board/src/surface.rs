//! Drawing surfaces: where a board gets its context, input and downloads.

use crate::error::{BoardError, BoardResult};
use crate::raster::RasterContext;
use atelier_core::PointerEventKind;
use kurbo::{Point, Rect, Size};
use std::path::{Path, PathBuf};

/// Identifies an attached input listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// An encoded image handed to the surface for saving as a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// The element a board draws on.
///
/// In a browser this is a canvas element; natively it can be anything that
/// hands out a raster context and forwards pointer input.
pub trait DrawingSurface {
    /// Bounding box of the surface in client coordinates.
    fn bounding_rect(&self) -> Rect;

    /// Acquire a 2D raster context. `None` if the surface cannot provide one.
    fn acquire_context(&mut self, width: u32, height: u32) -> Option<RasterContext>;

    /// Attach an input listener of the given kind.
    fn add_listener(&mut self, kind: PointerEventKind) -> ListenerId;

    /// Detach a listener. Returns false if it was not attached.
    fn remove_listener(&mut self, id: ListenerId) -> bool;

    /// Number of listeners currently attached.
    fn listener_count(&self) -> usize;

    /// Save an encoded image as a file on the user's side.
    fn deliver_download(&mut self, download: Download) -> BoardResult<()>;
}

/// In-memory surface for native embedding and tests.
#[derive(Debug)]
pub struct HeadlessSurface {
    origin: Point,
    size: Option<Size>,
    available: bool,
    listeners: Vec<(ListenerId, PointerEventKind)>,
    next_listener: u64,
    download_dir: Option<PathBuf>,
    downloads: Vec<Download>,
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessSurface {
    /// A surface at the client origin, sized by the context it hands out.
    pub fn new() -> Self {
        Self {
            origin: Point::ZERO,
            size: None,
            available: true,
            listeners: Vec::new(),
            next_listener: 0,
            download_dir: None,
            downloads: Vec::new(),
        }
    }

    /// A surface that refuses to provide a context.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Place the surface's top-left corner at `origin` in client coordinates.
    pub fn at(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Write downloads into `dir` instead of keeping them in memory.
    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = Some(dir.into());
        self
    }

    /// Downloads delivered so far. Empty when downloads go to a directory.
    pub fn downloads(&self) -> &[Download] {
        &self.downloads
    }

    pub fn has_listener(&self, kind: PointerEventKind) -> bool {
        self.listeners.iter().any(|(_, k)| *k == kind)
    }

    fn write_download(dir: &Path, download: &Download) -> BoardResult<PathBuf> {
        let name = Path::new(&download.filename);
        if name.components().count() != 1 || name.file_name().is_none() {
            return Err(BoardError::Download(format!(
                "'{}' is not a plain file name",
                download.filename
            )));
        }
        let path = dir.join(name);
        std::fs::write(&path, &download.bytes)?;
        Ok(path)
    }
}

impl DrawingSurface for HeadlessSurface {
    fn bounding_rect(&self) -> Rect {
        let size = self.size.unwrap_or(Size::ZERO);
        Rect::from_origin_size(self.origin, size)
    }

    fn acquire_context(&mut self, width: u32, height: u32) -> Option<RasterContext> {
        if !self.available {
            return None;
        }
        let context = RasterContext::new(width, height)?;
        self.size = Some(Size::new(f64::from(width), f64::from(height)));
        Some(context)
    }

    fn add_listener(&mut self, kind: PointerEventKind) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, kind));
        id
    }

    fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener, _)| *listener != id);
        self.listeners.len() != before
    }

    fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn deliver_download(&mut self, download: Download) -> BoardResult<()> {
        match &self.download_dir {
            Some(dir) => {
                let path = Self::write_download(dir, &download)?;
                log::info!(
                    "Saved {} ({} bytes) to {:?}",
                    download.filename,
                    download.bytes.len(),
                    path
                );
            }
            None => self.downloads.push(download),
        }
        Ok(())
    }
}
