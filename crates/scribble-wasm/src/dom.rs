//! DOM plumbing: window environment, element styling, and downloads.

use kurbo::Point;
use scribble_core::config::Environment;
use scribble_core::error::SurfaceError;
use scribble_core::model::ViewState;
use scribble_editor::{Downloader, ExportArtifact};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlAnchorElement, HtmlCanvasElement};

/// Read the viewport size and device pixel ratio. Missing values fall back
/// to the defaults.
pub fn read_environment() -> Environment {
    let defaults = Environment::default();
    let Some(window) = web_sys::window() else {
        log::warn!("no window, using default environment");
        return defaults;
    };
    let dim = |v: Result<JsValue, JsValue>, fallback: f64| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
    };
    Environment {
        viewport_width: dim(window.inner_width(), defaults.viewport_width),
        viewport_height: dim(window.inner_height(), defaults.viewport_height),
        device_pixel_ratio: window.device_pixel_ratio(),
    }
}

/// Top-left corner of the canvas in client coordinates.
pub fn client_origin(canvas: &HtmlCanvasElement) -> Point {
    let rect = canvas.get_bounding_client_rect();
    Point::new(rect.x(), rect.y())
}

/// Mirror the view state onto the element's class and inline style.
pub fn apply_view(canvas: &HtmlCanvasElement, view: &ViewState) {
    canvas.set_class_name(&view.class_name());
    if let Err(e) = canvas
        .style()
        .set_property("background-color", &view.background.to_hex())
    {
        log::warn!("failed to set background style: {e:?}");
    }
}

/// Offers exports through a temporary `<a download>` click.
pub struct AnchorDownloader;

impl Downloader for AnchorDownloader {
    fn download(&mut self, artifact: &ExportArtifact) -> Result<(), SurfaceError> {
        let platform = |e: JsValue| SurfaceError::Platform(format!("{e:?}"));
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| SurfaceError::Platform("no document".to_string()))?;
        let link = document
            .create_element("a")
            .map_err(platform)?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|e| platform(e.into()))?;
        link.set_href(&artifact.data_url);
        link.set_download(&artifact.file_name);
        link.click();
        Ok(())
    }
}
