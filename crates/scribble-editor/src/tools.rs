//! Freehand drawing tool.
//!
//! Translates normalized input into immediate-mode surface operations.
//!
//! | State | Event | Next | Operations |
//! |-------|-------|------|------------|
//! | any | down | Drawing | `BeginPath`, `MoveTo` |
//! | Drawing | move | Drawing | `LineTo`, `Stroke` |
//! | Idle | move | Idle | none |
//! | any | up / leave | Idle | none |
//!
//! A down while already drawing simply restarts the path.

use crate::input::InputEvent;
use kurbo::Point;
use smallvec::{SmallVec, smallvec};

/// A single immediate-mode call on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceOp {
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    Stroke,
}

pub type SurfaceOps = SmallVec<[SurfaceOp; 2]>;

/// Drag session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Idle,
    Drawing,
}

#[derive(Debug, Default)]
pub struct FreehandTool {
    session: Session,
}

impl FreehandTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn is_drawing(&self) -> bool {
        self.session == Session::Drawing
    }

    /// Handle an input event, returning the surface operations to apply.
    pub fn handle(&mut self, event: &InputEvent) -> SurfaceOps {
        match *event {
            InputEvent::PointerDown { pos } => {
                if self.is_drawing() {
                    log::debug!("pointer down while drawing, restarting path");
                }
                self.session = Session::Drawing;
                smallvec![SurfaceOp::BeginPath, SurfaceOp::MoveTo(pos)]
            }
            InputEvent::PointerMove { pos } => {
                if self.is_drawing() {
                    smallvec![SurfaceOp::LineTo(pos), SurfaceOp::Stroke]
                } else {
                    SmallVec::new()
                }
            }
            InputEvent::PointerUp | InputEvent::PointerLeave => {
                self.session = Session::Idle;
                SmallVec::new()
            }
        }
    }

    /// Drop any in-progress session.
    pub fn reset(&mut self) {
        self.session = Session::Idle;
    }
}
