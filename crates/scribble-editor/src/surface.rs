//! The drawing surface seam.
//!
//! The controller only ever talks to a `Surface`. The software [`Raster`]
//! implements it here; the wasm bridge implements it over a browser
//! `CanvasRenderingContext2d`.

use crate::tools::SurfaceOp;
use kurbo::Point;
use scribble_core::error::SurfaceError;
use scribble_render::{Raster, export};

pub trait Surface {
    fn begin_path(&mut self);
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn stroke(&mut self);

    /// Erase the whole bitmap in place.
    fn clear(&mut self);

    /// Serialize the bitmap as a `data:image/png;base64,` URI.
    fn to_png_data_url(&self) -> Result<String, SurfaceError>;

    fn apply(&mut self, op: SurfaceOp) {
        log::trace!("surface op {op:?}");
        match op {
            SurfaceOp::BeginPath => self.begin_path(),
            SurfaceOp::MoveTo(p) => self.move_to(p),
            SurfaceOp::LineTo(p) => self.line_to(p),
            SurfaceOp::Stroke => self.stroke(),
        }
    }
}

impl Surface for Raster {
    fn begin_path(&mut self) {
        Raster::begin_path(self);
    }

    fn move_to(&mut self, p: Point) {
        Raster::move_to(self, p);
    }

    fn line_to(&mut self, p: Point) {
        Raster::line_to(self, p);
    }

    fn stroke(&mut self) {
        Raster::stroke(self);
    }

    fn clear(&mut self) {
        Raster::clear(self);
    }

    fn to_png_data_url(&self) -> Result<String, SurfaceError> {
        export::to_data_url(self)
    }
}
