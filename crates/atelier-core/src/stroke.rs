//! Captured freehand strokes.

use crate::color::Rgba8;
use crate::tools::ToolKind;
use kurbo::{Line, Point, Rect};
use serde::{Deserialize, Serialize};

/// One pointer-down to pointer-up gesture, as the polyline it was drawn with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Canvas-relative points, in capture order.
    pub points: Vec<Point>,
    /// Line width the segments were drawn with.
    pub width: f64,
    /// Effective color (brush color with opacity applied).
    pub color: Rgba8,
    /// Whether the stroke painted or erased.
    pub tool: ToolKind,
}

impl Stroke {
    /// Start a stroke at `start`.
    pub fn begin(start: Point, width: f64, color: Rgba8, tool: ToolKind) -> Self {
        Self {
            points: vec![start],
            width,
            color,
            tool,
        }
    }

    /// Add a point to the path.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Line segments between consecutive points.
    pub fn segments(&self) -> impl Iterator<Item = Line> + '_ {
        self.points.windows(2).map(|w| Line::new(w[0], w[1]))
    }

    /// Bounding box of the points, not inflated by the line width.
    pub fn bounds(&self) -> Rect {
        let Some(first) = self.points.first() else {
            return Rect::ZERO;
        };

        self.points
            .iter()
            .skip(1)
            .fold(Rect::from_points(*first, *first), |rect, p| rect.union_pt(*p))
    }
}
