// Filled rectangle with an inward border.

use crate::color::{Color, rgb};
use crate::drawable::{self, Drawable, Paint};
use crate::collision::ObstacleId;
use crate::error::Result;
use crate::raster::Raster;
use crate::surface::{Surface, SurfaceLink};
use crate::types::Aabb;

pub const DEFAULT_BORDER_THICKNESS: u32 = 1;

pub struct Rectangle {
    bounds: Aabb,
    border: Color,
    fill: Option<Color>,   // None leaves the inside untouched
    border_thickness: u32, // pixels, drawn inward; 0 = no border
    rigidbody: bool,       // registers as a static obstacle when drawn
    surface: Option<SurfaceLink>,
    obstacle: Option<ObstacleId>,
}

impl Rectangle {
    /// A black-bordered, unfilled rectangle with its top-left corner at (x, y).
    /// Negative sizes extend up/left from the corner.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        let (x2, y2) = (x + width, y + height);
        Self {
            bounds: Aabb::new(x.min(x2), y.min(y2), x.max(x2), y.max(y2)),
            border: rgb(0, 0, 0),
            fill: None,
            border_thickness: DEFAULT_BORDER_THICKNESS,
            rigidbody: false,
            surface: None,
            obstacle: None,
        }
    }

    pub fn border(mut self, color: Color) -> Self {
        self.border = color;
        self
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn border_thickness(mut self, thickness: u32) -> Self {
        self.border_thickness = thickness;
        self
    }

    /// Mark as a static obstacle other entities land on.
    pub fn rigidbody(mut self, rigid: bool) -> Self {
        self.rigidbody = rigid;
        self
    }

    pub fn border_color(&self) -> Color {
        self.border
    }

    pub fn fill_color(&self) -> Option<Color> {
        self.fill
    }

    pub fn thickness(&self) -> u32 {
        self.border_thickness
    }

    pub fn is_rigidbody(&self) -> bool {
        self.rigidbody
    }

    #[inline]
    pub(crate) fn coords_box(&self) -> Aabb {
        self.bounds
    }
}

impl Drawable for Rectangle {
    fn coords(&self) -> Aabb {
        self.bounds
    }

    /// Deltas are applied exactly as given; rectangles may sit on fractional coords.
    fn move_by(&mut self, dx: f32, dy: f32, stepped: bool) -> Result<()> {
        drawable::move_entity(self, dx, dy, stepped)
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

impl Paint for Rectangle {
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
        raster.composite_rectangle(self);
    }
}
