//! `Surface` over a browser `CanvasRenderingContext2d`.
//!
//! The canvas backing store is the bitmap; every operation is delegated to
//! the context as-is.

use kurbo::Point;
use scribble_core::config::SurfaceGeometry;
use scribble_core::error::SurfaceError;
use scribble_editor::Surface;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct ContextSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl ContextSurface {
    /// Size the canvas for `geometry`, acquire its 2D context, and apply the
    /// device-pixel-ratio scale. The scale is applied here and nowhere else.
    pub fn mount(canvas: HtmlCanvasElement, geometry: &SurfaceGeometry) -> Result<Self, JsValue> {
        canvas.set_width(geometry.backing_width);
        canvas.set_height(geometry.backing_height);
        let style = canvas.style();
        style.set_property("width", &format!("{}px", geometry.css_width))?;
        style.set_property("height", &format!("{}px", geometry.css_height))?;

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2D context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        ctx.scale(geometry.scale, geometry.scale)?;

        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for ContextSurface {
    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, p: Point) {
        self.ctx.move_to(p.x, p.y);
    }

    fn line_to(&mut self, p: Point) {
        self.ctx.line_to(p.x, p.y);
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn clear(&mut self) {
        let (w, h) = (self.canvas.width() as f64, self.canvas.height() as f64);
        self.ctx.clear_rect(0.0, 0.0, w, h);
    }

    fn to_png_data_url(&self) -> Result<String, SurfaceError> {
        self.canvas
            .to_data_url_with_type("image/png")
            .map_err(|e| SurfaceError::Platform(format!("{e:?}")))
    }
}
