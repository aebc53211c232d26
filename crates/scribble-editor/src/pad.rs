//! The widget controller.
//!
//! `SketchPad` owns the view state, the freehand tool, and (while mounted)
//! the drawing surface. All interaction goes through it. Operations that
//! need the surface are silently skipped while nothing is mounted.

use crate::input::InputEvent;
use crate::surface::Surface;
use crate::tools::FreehandTool;
use kurbo::Point;
use scribble_core::error::SurfaceError;
use scribble_core::model::{BackgroundColor, FontWeight, ViewState};

/// File name of every exported image.
pub const DOWNLOAD_NAME: &str = "canvas.png";

/// An exported image, ready to be offered as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub data_url: String,
    pub file_name: String,
}

/// Delivers an export to the user (a browser download in the wasm bridge).
pub trait Downloader {
    fn download(&mut self, artifact: &ExportArtifact) -> Result<(), SurfaceError>;
}

pub struct SketchPad<S: Surface> {
    view: ViewState,
    tool: FreehandTool,
    surface: Option<S>,
}

impl<S: Surface> SketchPad<S> {
    /// A controller with default view state and no surface.
    pub fn new() -> Self {
        Self {
            view: ViewState::default(),
            tool: FreehandTool::new(),
            surface: None,
        }
    }

    /// Create and mount in one step.
    pub fn mounted(surface: S) -> Self {
        let mut pad = Self::new();
        pad.mount(surface);
        pad
    }

    /// Attach the drawing surface. State starts from its defaults.
    pub fn mount(&mut self, surface: S) {
        if self.surface.is_some() {
            log::warn!("mount over an already mounted surface, replacing it");
        }
        self.view = ViewState::default();
        self.tool.reset();
        self.surface = Some(surface);
        log::info!("surface mounted");
    }

    /// Detach and return the surface, discarding all transient state.
    pub fn unmount(&mut self) -> Option<S> {
        self.view = ViewState::default();
        self.tool.reset();
        let surface = self.surface.take();
        if surface.is_some() {
            log::info!("surface unmounted");
        }
        surface
    }

    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn is_drawing(&self) -> bool {
        self.tool.is_drawing()
    }

    // ─── Drawing surface ─────────────────────────────────────────────────

    /// Feed one input event. Returns `true` if the bitmap was touched.
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        let Some(surface) = self.surface.as_mut() else {
            log::debug!("no surface mounted, ignoring {event:?}");
            return false;
        };
        let ops = self.tool.handle(event);
        let changed = !ops.is_empty();
        for op in ops {
            surface.apply(op);
        }
        changed
    }

    pub fn pointer_down(&mut self, pos: Point) -> bool {
        self.handle(&InputEvent::from_mouse_down(pos.x, pos.y))
    }

    pub fn pointer_move(&mut self, pos: Point) -> bool {
        self.handle(&InputEvent::from_mouse_move(pos.x, pos.y))
    }

    pub fn pointer_up(&mut self) -> bool {
        self.handle(&InputEvent::from_mouse_up())
    }

    pub fn pointer_leave(&mut self) -> bool {
        self.handle(&InputEvent::from_mouse_leave())
    }

    // ─── Style controls ──────────────────────────────────────────────────

    /// Returns `false` (state unchanged) when `value` is not a hex color.
    pub fn set_background_color(&mut self, value: &str) -> bool {
        match BackgroundColor::parse(value) {
            Some(color) => {
                self.view.background = color;
                log::debug!("background color -> {}", color.to_hex());
                true
            }
            None => {
                log::warn!("rejected background color {value:?}");
                false
            }
        }
    }

    /// Returns `false` (state unchanged) for anything but the three option
    /// values.
    pub fn set_font_weight(&mut self, value: &str) -> bool {
        match FontWeight::parse(value) {
            Some(weight) => {
                self.view.font_weight = weight;
                log::debug!("font weight -> {}", weight.as_str());
                true
            }
            None => {
                log::warn!("rejected font weight {value:?}");
                false
            }
        }
    }

    // ─── Actions ─────────────────────────────────────────────────────────

    /// Reset the background to white and erase the bitmap. Font weight is
    /// kept. Skipped entirely when no surface is mounted.
    pub fn clear(&mut self) -> bool {
        let Some(surface) = self.surface.as_mut() else {
            log::debug!("no surface mounted, ignoring clear");
            return false;
        };
        self.view.reset_background();
        surface.clear();
        log::info!("surface cleared");
        true
    }

    /// Encode the bitmap and hand exactly one artifact to `downloader`.
    /// Returns `true` if a download was issued.
    pub fn export(&self, downloader: &mut impl Downloader) -> bool {
        let Some(surface) = self.surface.as_ref() else {
            log::debug!("no surface mounted, ignoring export");
            return false;
        };
        let artifact = match surface.to_png_data_url() {
            Ok(data_url) => ExportArtifact {
                data_url,
                file_name: DOWNLOAD_NAME.to_string(),
            },
            Err(e) => {
                log::warn!("export failed: {e}");
                return false;
            }
        };
        match downloader.download(&artifact) {
            Ok(()) => {
                log::info!(
                    "exported {} ({} bytes of data URI)",
                    artifact.file_name,
                    artifact.data_url.len()
                );
                true
            }
            Err(e) => {
                log::warn!("download failed: {e}");
                false
            }
        }
    }
}

impl<S: Surface> Default for SketchPad<S> {
    fn default() -> Self {
        Self::new()
    }
}
