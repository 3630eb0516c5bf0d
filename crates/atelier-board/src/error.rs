//! Board errors.

use thiserror::Error;

/// Board errors.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Drawing surface has no 2D context")]
    SurfaceUnavailable,
    #[error("Invalid board configuration: {0}")]
    InvalidConfig(String),
    #[error("Image encoding failed: {0}")]
    Encode(String),
    #[error("Download failed: {0}")]
    Download(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<png::EncodingError> for BoardError {
    fn from(error: png::EncodingError) -> Self {
        BoardError::Encode(error.to_string())
    }
}

impl From<image::ImageError> for BoardError {
    fn from(error: image::ImageError) -> Self {
        BoardError::Encode(error.to_string())
    }
}

/// Result type for board operations.
pub type BoardResult<T> = Result<T, BoardError>;
