//! Atelier Board Library
//!
//! The command surface every Atelier drawing board conforms to, and the
//! fallback raster board used when the rich canvas engine is unavailable.

mod board;
mod config;
mod error;
mod export;
mod raster;
mod surface;

pub use board::{Board, FallbackBoard};
pub use config::{BoardConfig, DrawingChangeCallback, MAX_DIMENSION};
pub use error::{BoardError, BoardResult};
pub use export::{ImageFormat, data_uri, encode, encode_png};
pub use raster::{RasterContext, SegmentStyle};
pub use surface::{Download, DrawingSurface, HeadlessSurface, ListenerId};
