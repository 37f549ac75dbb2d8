// What every entity on a surface can do, and the erase/translate/redraw
// protocol both shapes share.

use log::{debug, trace};

use crate::collision::ObstacleId;
use crate::error::{Error, Result};
use crate::gravity::{self, GravityConfig, GravityOutcome};
use crate::raster::Raster;
use crate::rectangle::Rectangle;
use crate::sprite::Sprite;
use crate::surface::{Surface, SurfaceLink};
use crate::types::{Aabb, ObstacleKind};

pub trait Drawable {
    /// Current bounds as (x1, y1, x2, y2).
    fn coords(&self) -> Aabb;

    /// Midpoint of the bounds; may be fractional.
    fn center(&self) -> (f32, f32) {
        self.coords().center()
    }

    /// Translate by (dx, dy). With `stepped`, the motion is split into unit
    /// steps (x first, then y) and every step becomes one animation frame.
    fn move_by(&mut self, dx: f32, dy: f32, stepped: bool) -> Result<()>;

    /// Bind to `surface` and draw for the first time. Entities draw once.
    fn draw(&mut self, surface: &Surface) -> Result<()>;

    /// The surface this entity was drawn on, if it has been drawn.
    fn surface(&self) -> Option<&SurfaceLink>;

    fn is_drawn(&self) -> bool {
        self.surface().is_some()
    }

    /// The obstacle this entity registered when drawn, if it is rigid.
    fn obstacle(&self) -> Option<ObstacleId> {
        None
    }

    /// Obstacle family this entity collides against.
    fn collider(&self) -> ObstacleKind {
        ObstacleKind::Rect
    }

    /// Fall until leaving the surface or landing in an obstacle.
    /// A rigid entity ignores the box it registered itself, so it falls onto
    /// the other obstacles like anything else.
    fn apply_gravity(&mut self, config: &GravityConfig) -> Result<GravityOutcome> {
        gravity::fall(self, config)
    }
}

/// The per-shape half of drawing: where the entity is and how it is painted.
pub(crate) trait Paint: Drawable {
    fn bounds_mut(&mut self) -> &mut Aabb;
    fn bind(&mut self, link: SurfaceLink, obstacle: Option<ObstacleId>);
    fn is_rigid(&self) -> bool;
    /// Composite onto the raster at the current bounds (records a frame).
    fn paint(&self, raster: &mut Raster);
}

pub(crate) fn draw_once<T: Paint>(entity: &mut T, surface: &Surface) -> Result<()> {
    if entity.is_drawn() {
        return Err(Error::InvalidState("entity has already been drawn".into()));
    }
    let link = surface.link();
    let cell = link.raster()?;
    let mut raster = cell.borrow_mut();
    // Rigid entities become obstacles before they are painted, so a failed
    // registration leaves the surface untouched.
    let obstacle = if entity.is_rigid() {
        Some(raster.registry.register(entity.collider(), &entity.coords().to_array())?)
    } else {
        None
    };
    debug!("drawing entity at {:?}", entity.coords());
    entity.paint(&mut raster);
    drop(raster);
    entity.bind(link, obstacle);
    Ok(())
}

pub(crate) fn move_entity<T: Paint>(entity: &mut T, dx: f32, dy: f32, stepped: bool) -> Result<()> {
    let Some(link) = entity.surface() else {
        return Err(Error::InvalidState("entity must be drawn before it can move".into()));
    };
    if !dx.is_finite() || !dy.is_finite() {
        return Err(Error::InvalidArgument(format!("cannot move by ({dx}, {dy})")));
    }
    let cell = link.raster()?;
    let mut raster = cell.borrow_mut();
    if stepped && !raster.is_animated() {
        return Err(Error::InvalidState(
            "stepped motion needs an animated surface".into(),
        ));
    }

    trace!("moving {:?} by ({dx}, {dy}), stepped: {stepped}", entity.coords());
    // One step = wipe where the entity was, shift it, paint it again.
    // Visual: on an animated surface each step is one frame of the GIF, so a
    // stepped move shows the entity sliding a pixel at a time.
    let mut step = |(sx, sy): (f32, f32)| {
        let before = entity.coords();
        raster.erase(&before);
        *entity.bounds_mut() = before.translated(sx, sy);
        entity.paint(&mut raster);
    };
    if stepped {
        unit_steps(dx, dy).for_each(&mut step);
    } else {
        step((dx, dy));
    }
    Ok(())
}

/// Split (dx, dy) into ±1 moves along x, then along y. A fractional remainder
/// on an axis becomes one final partial move on that axis.
/// Steps are produced lazily; a long move never builds its whole plan up front.
pub(crate) fn unit_steps(dx: f32, dy: f32) -> impl Iterator<Item = (f32, f32)> {
    axis_steps(dx)
        .map(|d| (d, 0.0))
        .chain(axis_steps(dy).map(|d| (0.0, d)))
}

fn axis_steps(delta: f32) -> impl Iterator<Item = f32> {
    let whole = delta.abs().trunc();
    let sign = delta.signum();
    let rest = delta - sign * whole;
    std::iter::repeat_n(sign, whole as usize).chain((rest != 0.0).then_some(rest))
}

/// Either shape, behind the one capability set.
pub enum Entity {
    Rectangle(Rectangle),
    Sprite(Sprite),
}

impl Drawable for Entity {
    fn coords(&self) -> Aabb {
        match self {
            Entity::Rectangle(r) => r.coords(),
            Entity::Sprite(s) => s.coords(),
        }
    }

    fn move_by(&mut self, dx: f32, dy: f32, stepped: bool) -> Result<()> {
        match self {
            Entity::Rectangle(r) => r.move_by(dx, dy, stepped),
            Entity::Sprite(s) => s.move_by(dx, dy, stepped),
        }
    }

    fn draw(&mut self, surface: &Surface) -> Result<()> {
        match self {
            Entity::Rectangle(r) => r.draw(surface),
            Entity::Sprite(s) => s.draw(surface),
        }
    }

    fn surface(&self) -> Option<&SurfaceLink> {
        match self {
            Entity::Rectangle(r) => r.surface(),
            Entity::Sprite(s) => s.surface(),
        }
    }

    fn obstacle(&self) -> Option<ObstacleId> {
        match self {
            Entity::Rectangle(r) => r.obstacle(),
            Entity::Sprite(s) => s.obstacle(),
        }
    }
}

impl From<Rectangle> for Entity {
    fn from(r: Rectangle) -> Self {
        Entity::Rectangle(r)
    }
}

impl From<Sprite> for Entity {
    fn from(s: Sprite) -> Self {
        Entity::Sprite(s)
    }
}
