//! RGBA8 bitmap with a canvas-style path and stroke model.
//!
//! Path points are transformed by the current transform when they are added
//! (as a 2D context does), so the stored path is in device pixels. Strokes
//! are hard-edged with butt caps; the stroke color is always opaque, which
//! makes re-stroking an already painted segment a no-op. `stroke` therefore
//! only paints segments added since the previous `stroke`, unless a
//! `clear_rect` happened in between.

use kurbo::{Affine, Point, Rect};
use scribble_core::config::{MAX_BACKING_DIMENSION, SurfaceGeometry};
use scribble_core::error::SurfaceError;
use scribble_core::model::{Color, StrokeStyle};
use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Segment {
    from: Point,
    to: Point,
}

pub struct Raster {
    width: u32,
    height: u32,
    /// Row-major RGBA8, straight alpha.
    data: Vec<u8>,
    transform: Affine,
    stroke_style: StrokeStyle,
    segments: SmallVec<[Segment; 16]>,
    /// Current point of the path, device space.
    current: Option<Point>,
    /// Segments already painted by a previous `stroke`.
    painted: usize,
}

impl Raster {
    /// A fully transparent bitmap with an identity transform. Either side
    /// may be at most [`MAX_BACKING_DIMENSION`].
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let too_large = SurfaceError::TooLarge { width, height };
        if width > MAX_BACKING_DIMENSION || height > MAX_BACKING_DIMENSION {
            return Err(too_large);
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or(too_large)?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
            transform: Affine::IDENTITY,
            stroke_style: StrokeStyle::DEFAULT,
            segments: SmallVec::new(),
            current: None,
            painted: 0,
        })
    }

    /// Allocate the backing store for `geometry` and apply its scale once.
    pub fn from_geometry(geometry: &SurfaceGeometry) -> Result<Self, SurfaceError> {
        let mut raster = Self::new(geometry.backing_width, geometry.backing_height)?;
        raster.scale(geometry.scale);
        log::debug!(
            "raster {}x{} (css {}x{}, scale {})",
            raster.width,
            raster.height,
            geometry.css_width,
            geometry.css_height,
            geometry.scale
        );
        Ok(raster)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 pixel data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Multiply the current transform by a uniform scale.
    pub fn scale(&mut self, factor: f64) {
        self.transform = self.transform * Affine::scale(factor);
    }

    // ─── Path ────────────────────────────────────────────────────────────

    /// Discard the current path.
    pub fn begin_path(&mut self) {
        self.segments.clear();
        self.current = None;
        self.painted = 0;
    }

    pub fn move_to(&mut self, p: Point) {
        self.current = Some(self.transform * p);
    }

    /// Append a segment from the current point. Without a current point this
    /// only sets one, like `lineTo` on an empty path.
    pub fn line_to(&mut self, p: Point) {
        let to = self.transform * p;
        if let Some(from) = self.current {
            self.segments.push(Segment { from, to });
        }
        self.current = Some(to);
    }

    pub fn has_current_point(&self) -> bool {
        self.current.is_some()
    }

    /// Paint the current path with the stroke style.
    pub fn stroke(&mut self) {
        let half_width = self.device_half_width();
        let color = self.stroke_style.color;
        for i in self.painted..self.segments.len() {
            let seg = self.segments[i];
            self.paint_segment(seg.from, seg.to, half_width, color);
        }
        log::trace!(
            "stroke: painted {} segment(s)",
            self.segments.len() - self.painted
        );
        self.painted = self.segments.len();
    }

    fn device_half_width(&self) -> f64 {
        let scale = self.transform.determinant().abs().sqrt();
        // Hairlines still cover one pixel.
        (self.stroke_style.width * scale / 2.0).max(0.5)
    }

    fn paint_segment(&mut self, a: Point, b: Point, half_width: f64, color: Color) {
        let v = b - a;
        let len2 = v.hypot2();
        if len2 == 0.0 {
            // A butt-capped zero-length segment covers nothing.
            return;
        }
        let len = len2.sqrt();

        let bbox = Rect::from_points(a, b).inflate(half_width, half_width);
        let Some((x0, y0, x1, y1)) = self.pixel_span(bbox) else {
            return;
        };

        for y in y0..y1 {
            for x in x0..x1 {
                let d = Point::new(x as f64 + 0.5, y as f64 + 0.5) - a;
                let t = d.dot(v) / len2;
                if !(0.0..=1.0).contains(&t) {
                    continue;
                }
                if d.cross(v).abs() / len <= half_width {
                    self.blend(x, y, color);
                }
            }
        }
    }

    // ─── Clearing ────────────────────────────────────────────────────────

    /// Make every pixel under the user-space rectangle transparent.
    /// The current path is kept; the next `stroke` repaints all of it.
    pub fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let device = self
            .transform
            .transform_rect_bbox(Rect::new(x, y, x + w, y + h));
        if let Some((x0, y0, x1, y1)) = self.pixel_span(device) {
            let stride = self.width as usize * 4;
            for row in y0..y1 {
                let start = row as usize * stride + x0 as usize * 4;
                let end = row as usize * stride + x1 as usize * 4;
                self.data[start..end].fill(0);
            }
        }
        self.painted = 0;
    }

    /// Clear the whole bitmap.
    pub fn clear(&mut self) {
        self.clear_rect(0.0, 0.0, self.width as f64, self.height as f64);
    }

    // ─── Pixel access ────────────────────────────────────────────────────

    /// Clamp a device-space rectangle to the pixel grid as
    /// `(x0, y0, x1, y1)` with exclusive upper bounds.
    fn pixel_span(&self, r: Rect) -> Option<(u32, u32, u32, u32)> {
        let clamp = |v: f64, max: u32| v.max(0.0).min(max as f64) as u32;
        let x0 = clamp(r.x0.floor(), self.width);
        let y0 = clamp(r.y0.floor(), self.height);
        let x1 = clamp(r.x1.ceil(), self.width);
        let y1 = clamp(r.y1.ceil(), self.height);
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y as usize * self.width as usize + x as usize) * 4)
    }

    fn blend(&mut self, x: u32, y: u32, color: Color) {
        if let Some(i) = self.offset(x, y) {
            let below = Color::rgba(self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]);
            self.data[i..i + 4].copy_from_slice(&color.over(below).to_array());
        }
    }

    /// The raw pixel at device coordinates.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let i = self.offset(x, y)?;
        Some(Color::rgba(self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]))
    }

    /// The pixel as seen on screen over an opaque background paint layer.
    pub fn composite_pixel(&self, x: u32, y: u32, background: Color) -> Option<Color> {
        self.pixel(x, y).map(|p| p.over(background))
    }

    /// `true` when no pixel has any coverage.
    pub fn is_blank(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 0)
    }

    /// Number of pixels with non-zero alpha.
    pub fn painted_pixels(&self) -> usize {
        self.data.chunks_exact(4).filter(|px| px[3] != 0).count()
    }
}

impl std::fmt::Debug for Raster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("transform", &self.transform)
            .field("segments", &self.segments.len())
            .finish()
    }
}
