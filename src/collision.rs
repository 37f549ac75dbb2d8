// Static obstacles that falling/moving entities can run into.
// Each registration stores a snapshot of the box at registration time; later
// moves of the entity that registered it do not change collision results.

use std::collections::HashMap;

use log::debug;

use crate::error::{Error, Result};
use crate::types::{Aabb, ObstacleKind};

/// Handle to one registration: its kind and its position in that kind's list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObstacleId {
    kind: ObstacleKind,
    index: usize,
}

#[derive(Clone)]
pub struct CollisionRegistry {
    width: u32,  // surface width the bounds check uses
    height: u32, // surface height the bounds check uses
    obstacles: HashMap<ObstacleKind, Vec<Aabb>>,
}

impl CollisionRegistry {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, obstacles: HashMap::new() }
    }

    /// Record an obstacle from its raw coordinates.
    /// A rectangle takes exactly (x1, y1, x2, y2) with x1 ≤ x2 and y1 ≤ y2.
    pub fn register(&mut self, kind: ObstacleKind, coords: &[f32]) -> Result<ObstacleId> {
        if coords.len() != kind.arity() {
            return Err(Error::InvalidArgument(format!(
                "{} obstacle needs {} coordinates, got {}",
                kind.name(),
                kind.arity(),
                coords.len()
            )));
        }
        let aabb = match kind {
            ObstacleKind::Rect => Aabb::new(coords[0], coords[1], coords[2], coords[3]),
        };
        if !aabb.is_valid() || coords.iter().any(|c| !c.is_finite()) {
            return Err(Error::InvalidArgument(format!(
                "{} obstacle coordinates out of order: {coords:?}",
                kind.name()
            )));
        }
        debug!("registered {} obstacle {:?}", kind.name(), aabb);
        let boxes = self.obstacles.entry(kind).or_default();
        boxes.push(aabb);
        Ok(ObstacleId { kind, index: boxes.len() - 1 })
    }

    /// Does `aabb` strictly overlap any registered obstacle of `kind`?
    pub fn check_collision(&self, aabb: &Aabb, kind: ObstacleKind) -> bool {
        self.check_collision_ignoring(aabb, kind, None)
    }

    /// Collision query that skips one registration, so a rigid entity that
    /// moves never collides with the snapshot it left behind.
    pub fn check_collision_ignoring(
        &self,
        aabb: &Aabb,
        kind: ObstacleKind,
        ignore: Option<ObstacleId>,
    ) -> bool {
        let Some(boxes) = self.obstacles.get(&kind) else { return false };
        boxes.iter().enumerate().any(|(index, b)| {
            ignore != Some(ObstacleId { kind, index }) && aabb.overlaps(b)
        })
    }

    /// Same query, with the kind given by name ("rect").
    pub fn check_collision_named(&self, aabb: &Aabb, kind: &str) -> Result<bool> {
        let kind: ObstacleKind = kind.parse()?;
        Ok(self.check_collision(aabb, kind))
    }

    /// True if any edge of `aabb` is outside the surface.
    pub fn check_out_of_bounds(&self, aabb: &Aabb) -> bool {
        aabb.exceeds(self.width, self.height)
    }

    /// Registered boxes of one kind, in registration order.
    pub fn obstacles(&self, kind: ObstacleKind) -> &[Aabb] {
        self.obstacles.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }
}
