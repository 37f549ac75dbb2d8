// Core geometry shared by the surface, the registry and the entities.

/// Axis-aligned bounding box in surface pixels: (left, top, right, bottom).
/// Fractional coordinates are allowed; rasterization rounds them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Aabb {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Box of the given size anchored at its top-left corner.
    pub fn from_origin(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// left ≤ right and top ≤ bottom
    pub fn is_valid(&self) -> bool {
        self.left <= self.right && self.top <= self.bottom
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Midpoint; may be fractional.
    pub fn center(&self) -> (f32, f32) {
        ((self.left + self.right) / 2.0, (self.top + self.bottom) / 2.0)
    }

    /// Same box shifted by (dx, dy).
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.left + dx, self.top + dy, self.right + dx, self.bottom + dy)
    }

    /// Strict overlap: boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }

    /// True if any edge lies outside [0, width] × [0, height].
    pub fn exceeds(&self, width: u32, height: u32) -> bool {
        let (w, h) = (width as f32, height as f32);
        self.left < 0.0 || self.top < 0.0 || self.right > w || self.bottom > h
    }

    /// As (x1, y1, x2, y2), the order obstacle registration takes.
    pub fn to_array(&self) -> [f32; 4] {
        [self.left, self.top, self.right, self.bottom]
    }
}

/// Shape family an obstacle or a moving collider belongs to.
/// Only axis-aligned rectangles exist today; sprites collide as rectangles too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    Rect,
}

impl ObstacleKind {
    /// How many coordinates one registration of this kind carries.
    pub fn arity(self) -> usize {
        match self {
            ObstacleKind::Rect => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ObstacleKind::Rect => "rect",
        }
    }
}

impl std::str::FromStr for ObstacleKind {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rect" | "rectangle" => Ok(ObstacleKind::Rect),
            other => Err(crate::error::Error::InvalidArgument(format!(
                "unknown obstacle kind {other:?}"
            ))),
        }
    }
}
