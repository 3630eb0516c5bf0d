//! Brush colors and CSS-style color string parsing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Color parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("Empty color string")]
    Empty,
    #[error("Invalid hex color: {0}")]
    InvalidHex(String),
    #[error("Invalid functional color: {0}")]
    InvalidFunction(String),
    #[error("Unknown color name: {0}")]
    UnknownName(String),
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse a CSS-style color string.
    ///
    /// Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`,
    /// `rgba(r, g, b, a)` with alpha in 0..=1, and a handful of named colors.
    pub fn parse(color: &str) -> Result<Self, ColorParseError> {
        let color = color.trim();
        if color.is_empty() {
            return Err(ColorParseError::Empty);
        }

        if let Some(hex) = color.strip_prefix('#') {
            return parse_hex(hex);
        }

        let lower = color.to_ascii_lowercase();
        if let Some(args) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
        {
            return parse_function(color, args);
        }

        named(&lower).ok_or_else(|| ColorParseError::UnknownName(color.to_string()))
    }

    /// Return this color with its alpha multiplied by `opacity` (clamped to 0..=1).
    pub fn with_opacity(self, opacity: f64) -> Self {
        let opacity = if opacity.is_nan() {
            1.0
        } else {
            opacity.clamp(0.0, 1.0)
        };
        let a = (f64::from(self.a) * opacity).round() as u8;
        Self { a, ..self }
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for Rgba8 {
    fn default() -> Self {
        Self::black()
    }
}

impl FromStr for Rgba8 {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

fn parse_hex(hex: &str) -> Result<Rgba8, ColorParseError> {
    let invalid = || ColorParseError::InvalidHex(format!("#{}", hex));
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);

    let parsed = match hex.len() {
        3 => (nibble(0), nibble(1), nibble(2), Ok(255)),
        4 => (nibble(0), nibble(1), nibble(2), nibble(3)),
        6 => (byte(0), byte(2), byte(4), Ok(255)),
        8 => (byte(0), byte(2), byte(4), byte(6)),
        _ => return Err(invalid()),
    };

    match parsed {
        (Ok(r), Ok(g), Ok(b), Ok(a)) => Ok(Rgba8::new(r, g, b, a)),
        _ => Err(invalid()),
    }
}

fn parse_function(color: &str, args: &str) -> Result<Rgba8, ColorParseError> {
    let invalid = || ColorParseError::InvalidFunction(color.to_string());
    let args = args.strip_suffix(')').ok_or_else(invalid)?;
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();

    if parts.len() != 3 && parts.len() != 4 {
        return Err(invalid());
    }

    let channel = |s: &str| -> Result<u8, ColorParseError> {
        let value: f64 = s.parse().map_err(|_| invalid())?;
        if !(0.0..=255.0).contains(&value) {
            return Err(invalid());
        }
        Ok(value.round() as u8)
    };

    let r = channel(parts[0])?;
    let g = channel(parts[1])?;
    let b = channel(parts[2])?;
    let a = match parts.get(3) {
        Some(alpha) => {
            let alpha: f64 = alpha.parse().map_err(|_| invalid())?;
            if !(0.0..=1.0).contains(&alpha) {
                return Err(invalid());
            }
            (alpha * 255.0).round() as u8
        }
        None => 255,
    };

    Ok(Rgba8::new(r, g, b, a))
}

fn named(name: &str) -> Option<Rgba8> {
    let color = match name {
        "black" => Rgba8::black(),
        "white" => Rgba8::white(),
        "red" => Rgba8::new(255, 0, 0, 255),
        "green" => Rgba8::new(0, 128, 0, 255),
        "blue" => Rgba8::new(0, 0, 255, 255),
        "yellow" => Rgba8::new(255, 255, 0, 255),
        "cyan" | "aqua" => Rgba8::new(0, 255, 255, 255),
        "magenta" | "fuchsia" => Rgba8::new(255, 0, 255, 255),
        "orange" => Rgba8::new(255, 165, 0, 255),
        "gray" | "grey" => Rgba8::new(128, 128, 128, 255),
        "transparent" => Rgba8::transparent(),
        _ => return None,
    };
    Some(color)
}
