//! Input abstraction layer.
//!
//! Normalizes mouse and touch events into a unified `InputEvent` in
//! canvas-relative CSS pixels. Mouse events already carry element-relative
//! offsets; touch events carry viewport (client) coordinates and are shifted
//! by the canvas element's client origin.

use kurbo::Point;

/// A normalized input event from any pointing device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Mouse down or touch start.
    PointerDown { pos: Point },

    /// Mouse move or touch move.
    PointerMove { pos: Point },

    /// Mouse up, touch end, or touch cancel.
    PointerUp,

    /// The mouse left the element.
    PointerLeave,
}

/// One entry of a touch list, in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub client_x: f64,
    pub client_y: f64,
}

impl TouchPoint {
    pub fn new(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y }
    }

    /// Position relative to an element whose top-left corner is at
    /// `origin` in client coordinates.
    pub fn relative_to(&self, origin: Point) -> Point {
        Point::new(self.client_x, self.client_y) - origin.to_vec2()
    }
}

impl InputEvent {
    pub fn from_mouse_down(offset_x: f64, offset_y: f64) -> Self {
        Self::PointerDown {
            pos: Point::new(offset_x, offset_y),
        }
    }

    pub fn from_mouse_move(offset_x: f64, offset_y: f64) -> Self {
        Self::PointerMove {
            pos: Point::new(offset_x, offset_y),
        }
    }

    pub fn from_mouse_up() -> Self {
        Self::PointerUp
    }

    pub fn from_mouse_leave() -> Self {
        Self::PointerLeave
    }

    /// Touch start from the event's active touches. Only the first touch is
    /// used; an empty list yields `None`.
    pub fn from_touch_start(touches: &[TouchPoint], origin: Point) -> Option<Self> {
        let first = touches.first()?;
        Some(Self::PointerDown {
            pos: first.relative_to(origin),
        })
    }

    pub fn from_touch_move(touches: &[TouchPoint], origin: Point) -> Option<Self> {
        let first = touches.first()?;
        Some(Self::PointerMove {
            pos: first.relative_to(origin),
        })
    }

    pub fn from_touch_end() -> Self {
        Self::PointerUp
    }

    /// Extract position if this event carries one.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerDown { pos } | Self::PointerMove { pos } => Some(*pos),
            Self::PointerUp | Self::PointerLeave => None,
        }
    }
}
