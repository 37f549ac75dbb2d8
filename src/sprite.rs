// Bitmap entity. Positions stay on whole pixels.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};

use crate::drawable::{self, Drawable, Paint};
use crate::collision::ObstacleId;
use crate::error::{Error, Result};
use crate::raster::Raster;
use crate::surface::{Surface, SurfaceLink};
use crate::types::Aabb;

pub struct Sprite {
    bounds: Aabb,
    bitmap: RgbaImage,
    rigidbody: bool,
    surface: Option<SurfaceLink>,
    obstacle: Option<ObstacleId>,
}

impl Sprite {
    /// Place `bitmap` with its top-left corner at (x, y), at its own size.
    pub fn new(x: i32, y: i32, bitmap: RgbaImage) -> Self {
        let (w, h) = bitmap.dimensions();
        Self {
            bounds: Aabb::from_origin(x as f32, y as f32, w as f32, h as f32),
            bitmap,
            rigidbody: false,
            surface: None,
            obstacle: None,
        }
    }

    pub fn from_image(x: i32, y: i32, image: DynamicImage) -> Self {
        Self::new(x, y, image.to_rgba8())
    }

    /// Decode the bitmap from a file.
    pub fn open<P: AsRef<Path>>(x: i32, y: i32, path: P) -> Result<Self> {
        let image = image::open(path)?;
        Ok(Self::from_image(x, y, image))
    }

    /// Resize either axis on its own; `None` keeps that axis as it is.
    pub fn resized(mut self, width: Option<u32>, height: Option<u32>) -> Result<Self> {
        let (w0, h0) = self.bitmap.dimensions();
        let (w, h) = (width.unwrap_or(w0), height.unwrap_or(h0));
        if w == 0 || h == 0 {
            return Err(Error::InvalidArgument(format!("cannot resize sprite to {w}x{h}")));
        }
        if (w, h) != (w0, h0) {
            self.bitmap = imageops::resize(&self.bitmap, w, h, FilterType::CatmullRom);
            self.bounds = Aabb::from_origin(self.bounds.left, self.bounds.top, w as f32, h as f32);
        }
        Ok(self)
    }

    /// Mark as a static obstacle other entities land on.
    pub fn rigidbody(mut self, rigid: bool) -> Self {
        self.rigidbody = rigid;
        self
    }

    pub fn bitmap(&self) -> &RgbaImage {
        &self.bitmap
    }

    pub fn size(&self) -> (u32, u32) {
        self.bitmap.dimensions()
    }

    #[inline]
    pub(crate) fn coords_box(&self) -> Aabb {
        self.bounds
    }
}

impl Drawable for Sprite {
    fn coords(&self) -> Aabb {
        self.bounds
    }

    /// Deltas are rounded to whole pixels (halves away from zero) first.
    fn move_by(&mut self, dx: f32, dy: f32, stepped: bool) -> Result<()> {
        drawable::move_entity(self, dx.round(), dy.round(), stepped)
    }

    fn draw(&mut self, surface: &Surface) -> Result<()> {
        drawable::draw_once(self, surface)
    }

    fn surface(&self) -> Option<&SurfaceLink> {
        self.surface.as_ref()
    }

    fn obstacle(&self) -> Option<ObstacleId> {
        self.obstacle
    }
}

impl Paint for Sprite {
    fn bounds_mut(&mut self) -> &mut Aabb {
        &mut self.bounds
    }

    fn bind(&mut self, link: SurfaceLink, obstacle: Option<ObstacleId>) {
        self.surface = Some(link);
        self.obstacle = obstacle;
    }

    fn is_rigid(&self) -> bool {
        self.rigidbody
    }

    fn paint(&self, raster: &mut Raster) {
        raster.composite_sprite(self);
    }
}
