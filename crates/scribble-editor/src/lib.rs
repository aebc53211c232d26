pub mod input;
pub mod pad;
pub mod surface;
pub mod tools;

pub use input::{InputEvent, TouchPoint};
pub use pad::{DOWNLOAD_NAME, Downloader, ExportArtifact, SketchPad};
pub use surface::Surface;
pub use tools::{FreehandTool, Session, SurfaceOp};
