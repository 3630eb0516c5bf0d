//! Still-image export of board content.

use crate::error::{BoardError, BoardResult};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use std::io::Cursor;

/// Image formats a board can export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Lossless, keeps transparency.
    #[default]
    Png,
    /// Lossy, transparency becomes black.
    Jpeg,
    /// Lossless WebP.
    WebP,
}

impl ImageFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::WebP => "image/webp",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::WebP => "webp",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "webp" => Some(ImageFormat::WebP),
            _ => None,
        }
    }
}

/// Encode straight RGBA8 pixels as PNG.
pub fn encode_png(rgba: &[u8], width: u32, height: u32) -> BoardResult<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(rgba)?;
        writer.finish()?;
    }
    Ok(png_data)
}

/// Encode straight RGBA8 pixels in `format`.
pub fn encode(format: ImageFormat, rgba: &[u8], width: u32, height: u32) -> BoardResult<Vec<u8>> {
    let mut bytes = Vec::new();
    match format {
        ImageFormat::Png => return encode_png(rgba, width, height),
        ImageFormat::Jpeg => {
            let rgb = image::DynamicImage::ImageRgba8(rgba_image(rgba, width, height)?).to_rgb8();
            rgb.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Jpeg)?;
        }
        ImageFormat::WebP => {
            rgba_image(rgba, width, height)?
                .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::WebP)?;
        }
    }
    Ok(bytes)
}

fn rgba_image(rgba: &[u8], width: u32, height: u32) -> BoardResult<image::RgbaImage> {
    image::RgbaImage::from_raw(width, height, rgba.to_vec()).ok_or_else(|| {
        BoardError::Encode(format!(
            "{} bytes do not make a {}x{} RGBA image",
            rgba.len(),
            width,
            height
        ))
    })
}

/// Build a `data:` URI for encoded image bytes.
pub fn data_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}
