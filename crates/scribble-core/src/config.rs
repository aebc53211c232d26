//! Surface configuration and mount-time geometry.
//!
//! The host passes a JSON config once at mount, together with the
//! environment it reads from the window (viewport size, device pixel
//! ratio). [`SurfaceConfig::resolve`] turns both into the final geometry.
//! Nothing here is reactive: a window resize after mount changes nothing.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_WIDTH: f64 = 600.0;
pub const DEFAULT_HEIGHT: f64 = 400.0;
pub const DEFAULT_HEIGHT_RATIO: f64 = 0.6;

/// Largest backing-store side browsers accept for a canvas.
pub const MAX_BACKING_DIMENSION: u32 = 32767;

fn default_width() -> f64 {
    DEFAULT_WIDTH
}

fn default_height() -> f64 {
    DEFAULT_HEIGHT
}

fn default_height_ratio() -> f64 {
    DEFAULT_HEIGHT_RATIO
}

/// How the surface's CSS size is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Sizing {
    /// Fixed CSS pixel dimensions.
    Fixed {
        #[serde(default = "default_width")]
        width: f64,
        #[serde(default = "default_height")]
        height: f64,
    },
    /// Full viewport width, a fraction of the viewport height.
    Viewport {
        #[serde(default = "default_height_ratio", rename = "heightRatio")]
        height_ratio: f64,
    },
}

impl Default for Sizing {
    fn default() -> Self {
        Sizing::Fixed {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct SurfaceConfig {
    pub sizing: Sizing,
}

/// Window properties read once at mount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Environment {
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub device_pixel_ratio: f64,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            viewport_width: 1024.0,
            viewport_height: 768.0,
            device_pixel_ratio: 1.0,
        }
    }
}

/// Resolved surface dimensions.
///
/// `css_*` is the element's layout size (the user-space coordinate range of
/// pointer events); `backing_*` is the bitmap size, `css * scale` rounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceGeometry {
    pub css_width: f64,
    pub css_height: f64,
    pub backing_width: u32,
    pub backing_height: u32,
    /// Device pixel ratio applied to the context once at mount.
    pub scale: f64,
}

impl SurfaceGeometry {
    /// Geometry for an unscaled surface of the given pixel size.
    pub fn unscaled(width: u32, height: u32) -> Self {
        Self {
            css_width: width as f64,
            css_height: height as f64,
            backing_width: width,
            backing_height: height,
            scale: 1.0,
        }
    }
}

fn within_backing_limit(v: f64) -> bool {
    v.is_finite() && v >= 0.0 && v.round() <= MAX_BACKING_DIMENSION as f64
}

impl SurfaceConfig {
    /// Parse and validate a JSON config. Missing fields take defaults, so
    /// `{}` is the fixed 600x400 surface.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SurfaceConfig = if json.trim().is_empty() {
            SurfaceConfig::default()
        } else {
            serde_json::from_str(json)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.sizing {
            Sizing::Fixed { width, height } => {
                let ok = |v: f64| v > 0.0 && within_backing_limit(v);
                if !ok(width) || !ok(height) {
                    return Err(ConfigError::InvalidSize { width, height });
                }
            }
            Sizing::Viewport { height_ratio } => {
                if !(height_ratio > 0.0 && height_ratio <= 1.0) {
                    return Err(ConfigError::InvalidHeightRatio(height_ratio));
                }
            }
        }
        Ok(())
    }

    /// Compute the mount-time geometry for the given environment. Fails when
    /// the scaled backing store would exceed [`MAX_BACKING_DIMENSION`].
    pub fn resolve(&self, env: &Environment) -> Result<SurfaceGeometry, ConfigError> {
        let scale = if env.device_pixel_ratio.is_finite() && env.device_pixel_ratio > 0.0 {
            env.device_pixel_ratio
        } else {
            log::debug!(
                "ignoring device pixel ratio {}, using 1.0",
                env.device_pixel_ratio
            );
            1.0
        };

        let (css_width, css_height) = match self.sizing {
            Sizing::Fixed { width, height } => (width, height),
            Sizing::Viewport { height_ratio } => (
                env.viewport_width.max(0.0),
                (env.viewport_height * height_ratio).max(0.0),
            ),
        };

        let (backing_width, backing_height) = (css_width * scale, css_height * scale);
        if !within_backing_limit(backing_width) || !within_backing_limit(backing_height) {
            return Err(ConfigError::SurfaceTooLarge {
                width: backing_width,
                height: backing_height,
            });
        }

        Ok(SurfaceGeometry {
            css_width,
            css_height,
            backing_width: backing_width.round() as u32,
            backing_height: backing_height.round() as u32,
            scale,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_config_is_fixed_default() {
        let config = SurfaceConfig::from_json("{}").unwrap();
        assert_eq!(config, SurfaceConfig::default());

        let geom = config.resolve(&Environment::default()).unwrap();
        assert_eq!(geom, SurfaceGeometry::unscaled(600, 400));
    }

    #[test]
    fn viewport_sizing_uses_height_ratio_and_dpr() {
        let config =
            SurfaceConfig::from_json(r#"{"sizing":{"kind":"viewport"}}"#).unwrap();
        let env = Environment {
            viewport_width: 1000.0,
            viewport_height: 500.0,
            device_pixel_ratio: 2.0,
        };
        let geom = config.resolve(&env).unwrap();
        assert_eq!(geom.css_width, 1000.0);
        assert_eq!(geom.css_height, 300.0);
        assert_eq!((geom.backing_width, geom.backing_height), (2000, 600));
        assert_eq!(geom.scale, 2.0);
    }

    #[test]
    fn bad_device_pixel_ratio_falls_back_to_one() {
        let env = Environment {
            device_pixel_ratio: f64::NAN,
            ..Environment::default()
        };
        let geom = SurfaceConfig::default().resolve(&env).unwrap();
        assert_eq!(geom.scale, 1.0);
        assert_eq!(geom.backing_width, 600);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            SurfaceConfig::from_json(r#"{"sizing":{"kind":"fixed","width":0}}"#),
            Err(ConfigError::InvalidSize { .. })
        ));
        assert!(matches!(
            SurfaceConfig::from_json(r#"{"sizing":{"kind":"viewport","heightRatio":1.5}}"#),
            Err(ConfigError::InvalidHeightRatio(_))
        ));
        assert!(matches!(
            SurfaceConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn download_name_is_not_configurable() {
        assert!(matches!(
            SurfaceConfig::from_json(r#"{"downloadName":"sketch.png"}"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn huge_fixed_size_is_rejected() {
        assert!(matches!(
            SurfaceConfig::from_json(r#"{"sizing":{"kind":"fixed","width":1e12,"height":1e12}}"#),
            Err(ConfigError::InvalidSize { .. })
        ));
        assert!(SurfaceConfig::from_json(r#"{"sizing":{"kind":"fixed","width":32767,"height":1}}"#).is_ok());
    }

    #[test]
    fn scaled_backing_store_over_limit_is_rejected() {
        let config =
            SurfaceConfig::from_json(r#"{"sizing":{"kind":"fixed","width":20000,"height":100}}"#)
                .unwrap();
        let env = Environment {
            device_pixel_ratio: 2.0,
            ..Environment::default()
        };
        assert!(matches!(
            config.resolve(&env),
            Err(ConfigError::SurfaceTooLarge { .. })
        ));

        let env = Environment {
            viewport_width: 40000.0,
            ..Environment::default()
        };
        assert!(matches!(
            SurfaceConfig {
                sizing: Sizing::Viewport { height_ratio: 0.6 }
            }
            .resolve(&env),
            Err(ConfigError::SurfaceTooLarge { .. })
        ));
    }
}
