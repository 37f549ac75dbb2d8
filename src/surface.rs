// The drawing surface callers create and entities draw onto.
//
// `Surface` owns the raster; entities only ever hold a `SurfaceLink`, a weak
// handle that never keeps the surface alive. Dropping the surface while entities
// still point at it turns their later calls into InvalidState errors.

use std::cell::RefCell;
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;
use std::rc::{Rc, Weak};

use image::{ImageFormat, RgbaImage};
use log::debug;

use crate::color::Color;
use crate::collision::ObstacleId;
use crate::error::{Error, Result};
use crate::export::{self, ExportOptions, SaveOptions};
use crate::preview::Preview;
use crate::raster::Raster;
use crate::rectangle::Rectangle;
use crate::sprite::Sprite;
use crate::types::{Aabb, ObstacleKind};

pub struct Surface {
    raster: Rc<RefCell<Raster>>,
}

impl Surface {
    /// A `width`×`height` buffer filled with `background`.
    /// Animated surfaces start their frame history with that first state.
    pub fn new(width: u32, height: u32, background: Color, animated: bool) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidArgument(format!(
                "surface size must be positive, got {width}x{height}"
            )));
        }
        debug!("new {width}x{height} surface (animated: {animated})");
        let raster = Raster::new(width, height, background, animated);
        Ok(Self { raster: Rc::new(RefCell::new(raster)) })
    }

    pub fn width(&self) -> u32 {
        self.raster.borrow().buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.raster.borrow().buffer.height()
    }

    pub fn background(&self) -> Color {
        self.raster.borrow().background
    }

    pub fn is_animated(&self) -> bool {
        self.raster.borrow().is_animated()
    }

    /// Number of recorded frames; 0 for still surfaces.
    pub fn history_len(&self) -> usize {
        self.raster.borrow().history_len()
    }

    /// Copy of recorded frame `index`, oldest first.
    pub fn frame(&self, index: usize) -> Option<RgbaImage> {
        self.raster.borrow().frames.as_ref()?.get(index).cloned()
    }

    /// Copy of the current buffer.
    pub fn snapshot(&self) -> RgbaImage {
        self.raster.borrow().buffer.clone()
    }

    /// Current color of one pixel, or None outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.raster.borrow().buffer.get_pixel_checked(x, y).copied()
    }

    /// Paint the box with the background color. Does not record a frame.
    pub fn erase_region(&self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.raster.borrow_mut().erase(&Aabb::new(x1, y1, x2, y2));
    }

    /// Draw a rectangle at its current bounds without binding it.
    pub fn composite_rectangle(&self, rect: &Rectangle) {
        self.raster.borrow_mut().composite_rectangle(rect);
    }

    /// Draw a sprite at its current bounds without binding it.
    pub fn composite_sprite(&self, sprite: &Sprite) {
        self.raster.borrow_mut().composite_sprite(sprite);
    }

    /// Drop every recorded frame except the current state.
    pub fn discard_history(&self) -> Result<()> {
        let mut raster = self.raster.borrow_mut();
        if !raster.is_animated() {
            return Err(Error::InvalidState(
                "discard_history needs an animated surface".into(),
            ));
        }
        debug!("discarding {} frames", raster.history_len() - 1);
        raster.reset_history();
        Ok(())
    }

    /// Show the surface in a window and block until it is closed.
    pub fn display(&self) -> Result<()> {
        if self.is_animated() {
            return Err(Error::UnsupportedOperation(
                "animated surfaces cannot be previewed".into(),
            ));
        }
        let image = self.snapshot();
        Preview::show("pixel-stage", &image)
    }

    /// Write the current buffer as a single image.
    pub fn export_still<W: Write + Seek>(
        &self,
        target: &mut W,
        format: ImageFormat,
        options: &ExportOptions,
    ) -> Result<()> {
        if let Some(option) = options.animation_only_option() {
            return Err(Error::UnsupportedOperation(format!(
                "{option} only applies to animations"
            )));
        }
        debug!("exporting still as {format:?}");
        export::write_still(&self.raster.borrow().buffer, target, format)
    }

    /// Write every recorded frame, oldest first.
    pub fn export_animation<W: Write>(
        &self,
        target: W,
        format: ImageFormat,
        options: &ExportOptions,
    ) -> Result<()> {
        let raster = self.raster.borrow();
        let Some(frames) = &raster.frames else {
            return Err(Error::InvalidState(
                "export_animation needs an animated surface".into(),
            ));
        };
        debug!("exporting {} frames as {format:?} ({options:?})", frames.len());
        export::write_animation(frames, target, format, options)
    }

    /// Write to a file: the animation on animated surfaces (unless
    /// `still_only`), otherwise the current buffer.
    pub fn save<P: AsRef<Path>>(&self, path: P, options: &SaveOptions) -> Result<()> {
        let path = path.as_ref();
        let format = match options.format {
            Some(format) => format,
            None => ImageFormat::from_path(path)?,
        };
        // Validate before the file is created so a bad call leaves nothing behind.
        if self.is_animated() && !options.still_only {
            if format != ImageFormat::Gif {
                return Err(Error::UnsupportedOperation(format!(
                    "animations can only be written as GIF, not {format:?}"
                )));
            }
            let mut file = BufWriter::new(File::create(path)?);
            self.export_animation(&mut file, format, &options.export)?;
            file.flush()?;
        } else {
            if let Some(option) = options.export.animation_only_option() {
                return Err(Error::UnsupportedOperation(format!(
                    "{option} only applies to animations"
                )));
            }
            let mut file = BufWriter::new(File::create(path)?);
            self.export_still(&mut file, format, &options.export)?;
            file.flush()?;
        }
        Ok(())
    }

    /// Independent deep copy: buffer, history and obstacles.
    /// Entities drawn on `self` stay bound to `self`.
    pub fn copy(&self) -> Surface {
        let raster = self.raster.borrow().clone();
        Surface { raster: Rc::new(RefCell::new(raster)) }
    }

    /// Register a static obstacle directly, as drawing a rigid entity does.
    pub fn register_obstacle(&self, kind: ObstacleKind, coords: &[f32]) -> Result<ObstacleId> {
        self.raster.borrow_mut().registry.register(kind, coords)
    }

    pub fn check_collision(&self, aabb: &Aabb, kind: ObstacleKind) -> bool {
        self.raster.borrow().registry.check_collision(aabb, kind)
    }

    pub fn check_out_of_bounds(&self, aabb: &Aabb) -> bool {
        self.raster.borrow().registry.check_out_of_bounds(aabb)
    }

    /// Registered obstacles of one kind, in registration order.
    pub fn obstacles(&self, kind: ObstacleKind) -> Vec<Aabb> {
        self.raster.borrow().registry.obstacles(kind).to_vec()
    }

    pub(crate) fn link(&self) -> SurfaceLink {
        SurfaceLink(Rc::downgrade(&self.raster))
    }
}

/// Non-owning handle from an entity back to the surface it was drawn on.
#[derive(Clone)]
pub struct SurfaceLink(Weak<RefCell<Raster>>);

impl SurfaceLink {
    pub(crate) fn raster(&self) -> Result<Rc<RefCell<Raster>>> {
        self.0
            .upgrade()
            .ok_or_else(|| Error::InvalidState("the surface this entity was drawn on is gone".into()))
    }

    pub fn check_collision(&self, aabb: &Aabb, kind: ObstacleKind) -> Result<bool> {
        self.check_collision_ignoring(aabb, kind, None)
    }

    /// Collision query that skips the caller's own registration.
    pub fn check_collision_ignoring(
        &self,
        aabb: &Aabb,
        kind: ObstacleKind,
        ignore: Option<ObstacleId>,
    ) -> Result<bool> {
        Ok(self.raster()?.borrow().registry.check_collision_ignoring(aabb, kind, ignore))
    }

    pub fn check_out_of_bounds(&self, aabb: &Aabb) -> Result<bool> {
        Ok(self.raster()?.borrow().registry.check_out_of_bounds(aabb))
    }

    /// Is this the handle of `surface`?
    pub fn points_to(&self, surface: &Surface) -> bool {
        Weak::ptr_eq(&self.0, &Rc::downgrade(&surface.raster))
    }
}
