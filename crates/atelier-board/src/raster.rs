//! Raster drawing context backed by a tiny-skia pixmap.

use atelier_core::Rgba8;
use kurbo::Point;
use tiny_skia::{BlendMode, Color, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

/// How a single line segment is rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentStyle {
    pub width: f64,
    pub color: Rgba8,
    /// Remove pixels instead of painting them.
    pub erase: bool,
}

impl SegmentStyle {
    pub fn paint(width: f64, color: Rgba8) -> Self {
        Self {
            width,
            color,
            erase: false,
        }
    }

    pub fn erase(width: f64) -> Self {
        Self {
            width,
            color: Rgba8::black(),
            erase: true,
        }
    }
}

/// The 2D context a board draws into.
///
/// Pixels are stored premultiplied; everything handed out is straight RGBA.
#[derive(Debug, Clone)]
pub struct RasterContext {
    pixmap: Pixmap,
}

impl RasterContext {
    /// Allocate a transparent context. `None` for zero or oversized dimensions.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Pixmap::new(width, height).map(|pixmap| Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Draw a straight segment with round caps and joins.
    ///
    /// Returns false if nothing was drawn: the width is not a usable `f32` or the
    /// segment could not be turned into a path.
    pub fn stroke_segment(&mut self, from: Point, to: Point, style: &SegmentStyle) -> bool {
        let width = style.width as f32;
        if !width.is_finite() || width <= 0.0 {
            log::warn!("Skipping segment with unusable width {}", style.width);
            return false;
        }

        let mut builder = PathBuilder::new();
        builder.move_to(from.x as f32, from.y as f32);
        builder.line_to(to.x as f32, to.y as f32);
        let Some(path) = builder.finish() else {
            log::debug!("Skipping degenerate segment {:?} -> {:?}", from, to);
            return false;
        };

        let mut paint = Paint::default();
        paint.anti_alias = true;
        if style.erase {
            paint.set_color_rgba8(0, 0, 0, 255);
            paint.blend_mode = BlendMode::DestinationOut;
        } else {
            let c = style.color;
            paint.set_color_rgba8(c.r, c.g, c.b, c.a);
        }

        let stroke = Stroke {
            width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };

        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        true
    }

    /// Wipe every pixel back to transparent.
    pub fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
    }

    /// Straight RGBA value of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            Rgba8::new(c.red(), c.green(), c.blue(), c.alpha())
        })
    }

    /// True if no pixel has any coverage.
    pub fn is_blank(&self) -> bool {
        self.pixmap.pixels().iter().all(|p| p.alpha() == 0)
    }

    /// Straight RGBA bytes, row-major.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.pixmap.data().len());
        for p in self.pixmap.pixels() {
            let c = p.demultiply();
            rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        rgba
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opaque_rows_in_column(ctx: &RasterContext, x: u32) -> u32 {
        (0..ctx.height())
            .filter(|&y| ctx.pixel(x, y).map(|p| p.a >= 128).unwrap_or(false))
            .count() as u32
    }

    #[test]
    fn test_new_is_blank() {
        let ctx = RasterContext::new(20, 10).unwrap();
        assert_eq!((ctx.width(), ctx.height()), (20, 10));
        assert!(ctx.is_blank());
        assert!(RasterContext::new(0, 10).is_none());
    }

    #[test]
    fn test_segment_width() {
        let mut ctx = RasterContext::new(300, 200).unwrap();
        let style = SegmentStyle::paint(10.0, Rgba8::black());
        assert!(ctx.stroke_segment(Point::new(100.0, 100.0), Point::new(200.0, 100.0), &style));
        assert_eq!(opaque_rows_in_column(&ctx, 150), 10);
    }

    #[test]
    fn test_unusable_width_draws_nothing() {
        let mut ctx = RasterContext::new(100, 100).unwrap();
        for width in [1e300, f64::INFINITY, 0.0] {
            let style = SegmentStyle::paint(width, Rgba8::black());
            assert!(!ctx.stroke_segment(Point::new(10.0, 10.0), Point::new(90.0, 10.0), &style));
        }
        assert!(ctx.is_blank());
    }

    #[test]
    fn test_segment_color_is_straight_rgba() {
        let mut ctx = RasterContext::new(100, 100).unwrap();
        let style = SegmentStyle::paint(6.0, Rgba8::new(255, 0, 0, 255));
        ctx.stroke_segment(Point::new(10.0, 50.5), Point::new(90.0, 50.5), &style);
        assert_eq!(ctx.pixel(50, 50), Some(Rgba8::new(255, 0, 0, 255)));
        assert_eq!(ctx.pixel(50, 10), Some(Rgba8::transparent()));
    }

    #[test]
    fn test_erase_removes_pixels() {
        let mut ctx = RasterContext::new(100, 100).unwrap();
        let paint = SegmentStyle::paint(10.0, Rgba8::black());
        ctx.stroke_segment(Point::new(0.0, 50.0), Point::new(100.0, 50.0), &paint);
        assert_eq!(ctx.pixel(50, 50).map(|p| p.a), Some(255));

        let erase = SegmentStyle::erase(20.0);
        ctx.stroke_segment(Point::new(40.0, 50.0), Point::new(60.0, 50.0), &erase);
        assert_eq!(ctx.pixel(50, 50).map(|p| p.a), Some(0));
        // Outside the eraser the line survives.
        assert_eq!(ctx.pixel(10, 50).map(|p| p.a), Some(255));
    }

    #[test]
    fn test_clear() {
        let mut ctx = RasterContext::new(50, 50).unwrap();
        ctx.stroke_segment(
            Point::new(0.0, 0.0),
            Point::new(50.0, 50.0),
            &SegmentStyle::paint(4.0, Rgba8::black()),
        );
        assert!(!ctx.is_blank());
        ctx.clear();
        assert!(ctx.is_blank());
    }

    #[test]
    fn test_to_rgba_length() {
        let ctx = RasterContext::new(7, 3).unwrap();
        assert_eq!(ctx.to_rgba().len(), 7 * 3 * 4);
    }
}
