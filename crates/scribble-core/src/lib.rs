pub mod config;
pub mod error;
pub mod model;

pub use config::{Environment, Sizing, SurfaceConfig, SurfaceGeometry};
pub use error::{ConfigError, SurfaceError};
pub use model::*;
