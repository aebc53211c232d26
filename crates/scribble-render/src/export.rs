//! PNG export of a [`Raster`].
//!
//! Only raster pixels are encoded. The element's CSS background is a
//! separate paint layer and never ends up in the file.

use crate::raster::Raster;
use base64::Engine as _;
use base64::engine::general_purpose;
use scribble_core::error::SurfaceError;

pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Encode the bitmap as an 8-bit RGBA PNG.
pub fn encode_png(raster: &Raster) -> Result<Vec<u8>, SurfaceError> {
    let (width, height) = (raster.width(), raster.height());
    if width == 0 || height == 0 {
        return Err(SurfaceError::Empty { width, height });
    }

    let mut buffer = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buffer, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| SurfaceError::Encode(e.to_string()))?;
        writer
            .write_image_data(raster.data())
            .map_err(|e| SurfaceError::Encode(e.to_string()))?;
        writer
            .finish()
            .map_err(|e| SurfaceError::Encode(e.to_string()))?;
    }

    log::debug!("encoded {width}x{height} PNG ({} bytes)", buffer.len());
    Ok(buffer)
}

/// Encode the bitmap as a `data:image/png;base64,...` URI.
pub fn to_data_url(raster: &Raster) -> Result<String, SurfaceError> {
    let bytes = encode_png(raster)?;
    let mut url = String::with_capacity(PNG_DATA_URL_PREFIX.len() + bytes.len() * 4 / 3 + 4);
    url.push_str(PNG_DATA_URL_PREFIX);
    general_purpose::STANDARD.encode_string(&bytes, &mut url);
    Ok(url)
}
