//! Error types shared by the raster, the controller, and the wasm bridge.

use thiserror::Error;

/// Failures while reading back or exporting a drawing surface.
#[derive(Error, Debug)]
pub enum SurfaceError {
    /// The surface has no pixels to encode.
    #[error("surface is empty ({width}x{height})")]
    Empty { width: u32, height: u32 },

    /// The requested bitmap exceeds the backing-store limit.
    #[error("surface {width}x{height} exceeds the backing-store limit")]
    TooLarge { width: u32, height: u32 },

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    Encode(String),

    /// The host platform refused the operation (e.g. a tainted canvas).
    #[error("platform error: {0}")]
    Platform(String),
}

/// Failures while loading a [`SurfaceConfig`](crate::config::SurfaceConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid surface config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid surface size {width}x{height}")]
    InvalidSize { width: f64, height: f64 },

    #[error("viewport height ratio must be in (0, 1], got {0}")]
    InvalidHeightRatio(f64),

    #[error("backing store {width}x{height} exceeds the canvas size limit")]
    SurfaceTooLarge { width: f64, height: f64 },
}
