// pixel-stage: draw rectangles and bitmaps on a raster surface, move them around
// (optionally one frame per pixel of motion), let them fall onto static
// obstacles, and export the result as a still image or a GIF.
//
//   Surface   owns the pixels, the frame history and the obstacle registry
//   Rectangle / Sprite   entities that bind to a surface on their first draw
//   gravity   the fall-until-blocked loop

pub mod collision;
pub mod color;
pub mod drawable;
pub mod error;
pub mod export;
pub mod gravity;
pub mod preview;
mod raster;
pub mod rectangle;
pub mod sprite;
pub mod surface;
pub mod types;

pub use collision::ObstacleId;
pub use color::Color;
pub use drawable::{Drawable, Entity};
pub use error::{Error, Result};
pub use export::{ExportOptions, SaveOptions};
pub use gravity::{GravityConfig, GravityOutcome, GravityStop};
pub use rectangle::Rectangle;
pub use sprite::Sprite;
pub use surface::{Surface, SurfaceLink};
pub use types::{Aabb, ObstacleKind};
