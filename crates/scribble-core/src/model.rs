//! View-state model for the drawing widget.
//!
//! Everything here is plain data owned by the controller: the background
//! paint layer, the cosmetic font-weight class, and the fixed stroke style
//! used for every freehand segment. The raster itself lives in
//! `scribble-render`; nothing in this module touches pixels.

use serde::Serialize;

// ─── Colors ──────────────────────────────────────────────────────────────

/// 8-bit RGBA color, straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 0xFF)
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        match bytes.len() {
            3 | 4 => {
                let mut ch = [0xFF_u8; 4];
                for (slot, &b) in ch.iter_mut().zip(bytes) {
                    *slot = hex_val(b)? * 17;
                }
                Some(Self::rgba(ch[0], ch[1], ch[2], ch[3]))
            }
            6 | 8 => {
                let mut ch = [0xFF_u8; 4];
                for (slot, pair) in ch.iter_mut().zip(bytes.chunks_exact(2)) {
                    *slot = hex_val(pair[0])? << 4 | hex_val(pair[1])?;
                }
                Some(Self::rgba(ch[0], ch[1], ch[2], ch[3]))
            }
            _ => None,
        }
    }

    /// Emit as lowercase `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    /// Lowercase matches what `<input type="color">` reports.
    pub fn to_hex(&self) -> String {
        if self.a == 0xFF {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Source-over composite of `self` on top of `below`.
    pub fn over(self, below: Color) -> Color {
        match self.a {
            0xFF => self,
            0 => below,
            a => {
                let sa = a as u32;
                let da = below.a as u32 * (255 - sa) / 255;
                let out_a = sa + da;
                let mix = |s: u8, d: u8| -> u8 {
                    ((s as u32 * sa + d as u32 * da) / out_a.max(1)) as u8
                };
                Color::rgba(
                    mix(self.r, below.r),
                    mix(self.g, below.g),
                    mix(self.b, below.b),
                    out_a as u8,
                )
            }
        }
    }
}

// ─── Background paint layer ──────────────────────────────────────────────

/// The element's CSS background color.
///
/// Always an opaque `#rrggbb` value: the color input never reports alpha,
/// and inputs carrying an alpha channel are rejected rather than silently
/// flattened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackgroundColor(Color);

impl BackgroundColor {
    pub const WHITE: BackgroundColor = BackgroundColor(Color::WHITE);

    /// Accepts `#rgb` or `#rrggbb` (the `#` is required, as the color input
    /// always emits it).
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if !trimmed.starts_with('#') {
            return None;
        }
        let color = Color::from_hex(trimmed)?;
        (color.a == 0xFF).then_some(Self(color))
    }

    pub fn color(&self) -> Color {
        self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl Default for BackgroundColor {
    fn default() -> Self {
        Self::WHITE
    }
}

// ─── Font weight ─────────────────────────────────────────────────────────

/// Font-weight selector value. Purely cosmetic: it only picks the
/// `font-*` utility class on the surface element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    SemiBold,
    Bold,
}

/// One entry of the font-weight `<select>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FontWeightOption {
    pub value: &'static str,
    pub label: &'static str,
}

impl FontWeight {
    pub const ALL: [FontWeight; 3] = [FontWeight::Normal, FontWeight::SemiBold, FontWeight::Bold];

    /// Option value, also the suffix of the CSS class.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::SemiBold => "semibold",
            Self::Bold => "bold",
        }
    }

    /// Label shown in the select box.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::SemiBold => "Bold",
            Self::Bold => "Bolder",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "normal" => Some(Self::Normal),
            "semibold" => Some(Self::SemiBold),
            "bold" => Some(Self::Bold),
            _ => None,
        }
    }

    pub fn css_class(&self) -> String {
        format!("font-{}", self.as_str())
    }

    pub fn options() -> Vec<FontWeightOption> {
        Self::ALL
            .iter()
            .map(|w| FontWeightOption {
                value: w.as_str(),
                label: w.label(),
            })
            .collect()
    }
}

// ─── Stroke style ────────────────────────────────────────────────────────

/// Line style for freehand strokes. Only the 2D-context defaults are ever
/// used; there is no control that changes them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    /// Width in user-space units (before device-pixel-ratio scaling).
    pub width: f64,
}

impl StrokeStyle {
    pub const DEFAULT: StrokeStyle = StrokeStyle {
        color: Color::BLACK,
        width: 1.0,
    };
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ─── View state ──────────────────────────────────────────────────────────

/// Classes that are always present on the surface element.
pub const BASE_CLASSES: &str = "mx-2 border-gray-800 text-white";

/// Current-value style state mirrored onto the surface element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    pub background: BackgroundColor,
    pub font_weight: FontWeight,
}

impl ViewState {
    /// Reset performed by the Clear action. Font weight survives.
    pub fn reset_background(&mut self) {
        self.background = BackgroundColor::WHITE;
    }

    /// Full class attribute for the surface element.
    pub fn class_name(&self) -> String {
        format!("{BASE_CLASSES} {}", self.font_weight.css_class())
    }

    /// Inline style attribute for the surface element.
    pub fn inline_style(&self) -> String {
        format!("background-color: {};", self.background.to_hex())
    }
}
