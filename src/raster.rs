// The pixel buffer behind a Surface, plus its frame history and obstacles.
// Coordinates are surface pixels; a box (x1, y1, x2, y2) covers the pixels
// round(x1)..=round(x2) × round(y1)..=round(y2), clipped to the buffer.

use image::{RgbaImage, imageops};
use log::trace;

use crate::collision::CollisionRegistry;
use crate::color::{Color, TRANSPARENT};
use crate::rectangle::Rectangle;
use crate::sprite::Sprite;
use crate::types::Aabb;

#[derive(Clone)]
pub(crate) struct Raster {
    pub(crate) background: Color,
    pub(crate) buffer: RgbaImage,              // what the surface looks like right now
    pub(crate) frames: Option<Vec<RgbaImage>>, // Some(..) only on animated surfaces, never empty
    pub(crate) registry: CollisionRegistry,
}

impl Raster {
    pub(crate) fn new(width: u32, height: u32, background: Color, animated: bool) -> Self {
        let buffer = RgbaImage::from_pixel(width, height, background);
        let frames = animated.then(|| vec![buffer.clone()]);
        Self { background, buffer, frames, registry: CollisionRegistry::new(width, height) }
    }

    #[inline]
    pub(crate) fn is_animated(&self) -> bool {
        self.frames.is_some()
    }

    pub(crate) fn history_len(&self) -> usize {
        self.frames.as_ref().map_or(0, Vec::len)
    }

    /// Snapshot the buffer into the history (animated surfaces only).
    pub(crate) fn record_frame(&mut self) {
        if let Some(frames) = &mut self.frames {
            frames.push(self.buffer.clone());
            trace!("recorded frame {}", frames.len() - 1);
        }
    }

    /// Collapse the history to one entry: the current buffer.
    pub(crate) fn reset_history(&mut self) {
        if let Some(frames) = &mut self.frames {
            frames.clear();
            frames.push(self.buffer.clone());
        }
    }

    /// Paint a box with the background color. Records nothing.
    /// Visual: the box's pixels go back to the plain background, including
    /// anything else that happened to overlap it.
    pub(crate) fn erase(&mut self, aabb: &Aabb) {
        let bg = self.background;
        self.fill_box(aabb, bg);
    }

    /// Border drawn inward `thickness` pixels from each edge, fill inside it.
    /// Visual: a thick border eats into the fill; the outer size never grows.
    pub(crate) fn composite_rectangle(&mut self, rect: &Rectangle) {
        let b = rect.coords_box();
        if let Some(fill) = rect.fill_color() {
            self.fill_box(&b, fill);
        }
        let t = rect.thickness() as f32;
        if t > 0.0 {
            let border = rect.border_color();
            // Four bands, each `t` pixels deep; they overlap at the corners.
            let inset = t - 1.0;
            self.fill_box(&Aabb::new(b.left, b.top, b.right, b.top + inset), border);
            self.fill_box(&Aabb::new(b.left, b.bottom - inset, b.right, b.bottom), border);
            self.fill_box(&Aabb::new(b.left, b.top, b.left + inset, b.bottom), border);
            self.fill_box(&Aabb::new(b.right - inset, b.top, b.right, b.bottom), border);
        }
        self.record_frame();
    }

    /// Paste the sprite's bitmap with its top-left corner at the sprite origin.
    pub(crate) fn composite_sprite(&mut self, sprite: &Sprite) {
        let at = sprite.coords_box();
        let (x, y) = (at.left.round() as i64, at.top.round() as i64);
        self.paste(sprite.bitmap(), x, y);
        self.record_frame();
    }

    /// Opaque bitmaps are copied straight in. Anything with alpha is placed on a
    /// transparent surface-sized layer first, and that layer is blended on top.
    /// Visual: see-through pixels of a sprite show whatever was underneath.
    pub(crate) fn paste(&mut self, bitmap: &RgbaImage, x: i64, y: i64) {
        if is_opaque(bitmap) {
            imageops::replace(&mut self.buffer, bitmap, x, y);
        } else {
            let (w, h) = self.buffer.dimensions();
            let mut layer = RgbaImage::from_pixel(w, h, TRANSPARENT);
            imageops::replace(&mut layer, bitmap, x, y);
            imageops::overlay(&mut self.buffer, &layer, 0, 0);
        }
    }

    /// Fill the pixels a box covers. Boxes entirely off the buffer are ignored.
    pub(crate) fn fill_box(&mut self, aabb: &Aabb, color: Color) {
        let Some((x0, y0, x1, y1)) = self.clip(aabb) else { return };
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.buffer.put_pixel(x, y, color);
            }
        }
    }

    /// Inclusive pixel span of a box inside the buffer, if any.
    /// Boxes with NaN or infinite edges cover nothing.
    fn clip(&self, aabb: &Aabb) -> Option<(u32, u32, u32, u32)> {
        if !aabb.to_array().iter().all(|c| c.is_finite()) {
            return None;
        }
        let (w, h) = self.buffer.dimensions();
        let x0 = aabb.left.round().max(0.0);
        let y0 = aabb.top.round().max(0.0);
        let x1 = aabb.right.round().min(w as f32 - 1.0);
        let y1 = aabb.bottom.round().min(h as f32 - 1.0);
        if x0 > x1 || y0 > y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

fn is_opaque(bitmap: &RgbaImage) -> bool {
    bitmap.pixels().all(|p| p.0[3] == u8::MAX)
}
