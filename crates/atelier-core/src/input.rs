//! Pointer input for drawing surfaces.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// The pointer listener kinds a board attaches to its surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Leave,
}

impl PointerEventKind {
    /// All listener kinds, in attachment order.
    pub const ALL: [PointerEventKind; 4] = [
        PointerEventKind::Down,
        PointerEventKind::Move,
        PointerEventKind::Up,
        PointerEventKind::Leave,
    ];
}

/// Pointer event in client (window) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { client: Point },
    Move { client: Point },
    Up { client: Point },
    /// The pointer left the surface.
    Leave,
}

impl PointerEvent {
    pub fn down(x: f64, y: f64) -> Self {
        Self::Down {
            client: Point::new(x, y),
        }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::Move {
            client: Point::new(x, y),
        }
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::Up {
            client: Point::new(x, y),
        }
    }

    /// The listener kind that receives this event.
    pub fn kind(&self) -> PointerEventKind {
        match self {
            PointerEvent::Down { .. } => PointerEventKind::Down,
            PointerEvent::Move { .. } => PointerEventKind::Move,
            PointerEvent::Up { .. } => PointerEventKind::Up,
            PointerEvent::Leave => PointerEventKind::Leave,
        }
    }
}

/// Convert client coordinates to coordinates relative to the surface's
/// bounding box origin.
pub fn to_canvas(client: Point, bounds: Rect) -> Point {
    Point::new(client.x - bounds.x0, client.y - bounds.y0)
}
