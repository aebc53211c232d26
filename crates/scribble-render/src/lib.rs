//! Software rendition of the drawing surface.
//!
//! [`Raster`] mirrors the subset of the 2D canvas context the widget uses:
//! one current path, `stroke`, `clearRect`, and a scale transform applied
//! at mount. [`export`] turns the bitmap into a PNG data URI.

pub mod export;
pub mod raster;

pub use export::{PNG_DATA_URL_PREFIX, encode_png, to_data_url};
pub use raster::Raster;
