//! WASM bridge for Scribble: binds the drawing widget to an HTML `<canvas>`.
//!
//! Compiled via `wasm-pack build --target web`. The host page owns the
//! controls (color input, font-weight select, buttons) and forwards their
//! events here; this crate owns the canvas element's bitmap, class list and
//! inline background style.

mod context;
mod dom;
mod logging;

use context::ContextSurface;
use kurbo::Point;
use scribble_core::config::SurfaceConfig;
use scribble_core::model::FontWeight;
use scribble_editor::{InputEvent, SketchPad, TouchPoint};
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

/// The main WASM-facing widget controller.
#[wasm_bindgen]
pub struct ScribbleCanvas {
    pad: SketchPad<ContextSurface>,
}

#[wasm_bindgen]
impl ScribbleCanvas {
    /// Mount the widget on `canvas`. `config_json` may be empty for the
    /// fixed 600x400 surface.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config_json: &str) -> Result<ScribbleCanvas, JsValue> {
        logging::install();

        let config = SurfaceConfig::from_json(config_json)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let env = dom::read_environment();
        let geometry = config
            .resolve(&env)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let surface = ContextSurface::mount(canvas, &geometry)?;
        log::info!(
            "mounted {}x{} css px at scale {}",
            geometry.css_width,
            geometry.css_height,
            geometry.scale
        );

        let pad = SketchPad::mounted(surface);
        let this = Self { pad };
        this.sync_view();
        Ok(this)
    }

    // ─── Mouse ───────────────────────────────────────────────────────────

    /// `offsetX`/`offsetY` of a mousedown. Returns true if the bitmap changed.
    pub fn mouse_down(&mut self, offset_x: f64, offset_y: f64) -> bool {
        self.pad
            .handle(&InputEvent::from_mouse_down(offset_x, offset_y))
    }

    pub fn mouse_move(&mut self, offset_x: f64, offset_y: f64) -> bool {
        self.pad
            .handle(&InputEvent::from_mouse_move(offset_x, offset_y))
    }

    pub fn mouse_up(&mut self) -> bool {
        self.pad.handle(&InputEvent::from_mouse_up())
    }

    pub fn mouse_leave(&mut self) -> bool {
        self.pad.handle(&InputEvent::from_mouse_leave())
    }

    // ─── Touch ───────────────────────────────────────────────────────────

    /// `clientX`/`clientY` of the first active touch.
    pub fn touch_start(&mut self, client_x: f64, client_y: f64) -> bool {
        self.handle_touch(client_x, client_y, InputEvent::from_touch_start)
    }

    pub fn touch_move(&mut self, client_x: f64, client_y: f64) -> bool {
        self.handle_touch(client_x, client_y, InputEvent::from_touch_move)
    }

    /// Touch end or cancel.
    pub fn touch_end(&mut self) -> bool {
        self.pad.handle(&InputEvent::from_touch_end())
    }

    // ─── Style controls ──────────────────────────────────────────────────

    /// Returns `false` if `value` is not a hex color.
    pub fn set_background_color(&mut self, value: &str) -> bool {
        let accepted = self.pad.set_background_color(value);
        if accepted {
            self.sync_view();
        }
        accepted
    }

    /// Returns `false` unless `value` is `normal`, `semibold` or `bold`.
    pub fn set_font_weight(&mut self, value: &str) -> bool {
        let accepted = self.pad.set_font_weight(value);
        if accepted {
            self.sync_view();
        }
        accepted
    }

    /// Current background color as `#rrggbb`.
    pub fn background_color(&self) -> String {
        self.pad.view().background.to_hex()
    }

    /// Current font-weight option value.
    pub fn font_weight(&self) -> String {
        self.pad.view().font_weight.as_str().to_string()
    }

    /// Class attribute currently applied to the canvas.
    pub fn class_name(&self) -> String {
        self.pad.view().class_name()
    }

    // ─── Actions ─────────────────────────────────────────────────────────

    /// Erase the drawing and reset the background to white.
    pub fn clear(&mut self) -> bool {
        let cleared = self.pad.clear();
        if cleared {
            self.sync_view();
        }
        cleared
    }

    /// Download the drawing as `canvas.png`. Returns `true` if a download
    /// was triggered.
    pub fn save_as_png(&self) -> bool {
        self.pad.export(&mut dom::AnchorDownloader)
    }

    /// Release the canvas. Every later call is a no-op.
    pub fn unmount(&mut self) {
        self.pad.unmount();
    }

    pub fn is_mounted(&self) -> bool {
        self.pad.is_mounted()
    }

    pub fn is_drawing(&self) -> bool {
        self.pad.is_drawing()
    }
}

impl ScribbleCanvas {
    fn handle_touch(
        &mut self,
        client_x: f64,
        client_y: f64,
        make: fn(&[TouchPoint], Point) -> Option<InputEvent>,
    ) -> bool {
        let Some(origin) = self.pad.surface().map(|s| dom::client_origin(s.canvas())) else {
            log::debug!("no surface mounted, ignoring touch");
            return false;
        };
        match make(&[TouchPoint::new(client_x, client_y)], origin) {
            Some(event) => self.pad.handle(&event),
            None => false,
        }
    }

    fn sync_view(&self) {
        if let Some(surface) = self.pad.surface() {
            dom::apply_view(surface.canvas(), self.pad.view());
        }
    }
}

// ─── Standalone helpers (no canvas needed) ───────────────────────────────

/// Font-weight select options as JSON: `[{"value":"normal","label":"Normal"},...]`.
#[wasm_bindgen]
pub fn font_weight_options() -> String {
    serde_json::to_string(&FontWeight::options()).unwrap_or_else(|_| "[]".to_string())
}

/// Change the console log level (`error`, `warn`, `info`, `debug`, `trace`,
/// `off`). Returns `false` for unknown names.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> bool {
    match level.parse::<log::LevelFilter>() {
        Ok(filter) => {
            logging::install();
            log::set_max_level(filter);
            true
        }
        Err(_) => false,
    }
}
