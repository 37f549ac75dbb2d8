// Gravity: fall faster every step until out of bounds or inside an obstacle.

use log::{trace, warn};

use crate::drawable::Drawable;
use crate::error::{Error, Result};

/// Velocity gained per step, in pixels per step.
pub const GRAVITY_ACCELERATION: f32 = 0.6;

/// Step bound used by `GravityConfig::default()`.
pub const DEFAULT_MAX_STEPS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityConfig {
    pub acceleration: f32,
    /// Give up after this many steps. `None` falls until something stops it,
    /// which never happens above an empty, bottomless surface.
    pub max_steps: Option<usize>,
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self { acceleration: GRAVITY_ACCELERATION, max_steps: Some(DEFAULT_MAX_STEPS) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GravityStop {
    /// Overlapped a registered obstacle
    Collided,
    /// An edge left the surface
    OutOfBounds,
    /// Hit `max_steps` first
    StepLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GravityOutcome {
    pub steps: usize,
    pub stop: GravityStop,
}

/// Drive `entity` downward; each step adds `acceleration` to the velocity and
/// moves by it (one frame per step on animated surfaces).
pub fn fall<D: Drawable + ?Sized>(entity: &mut D, config: &GravityConfig) -> Result<GravityOutcome> {
    if !entity.is_drawn() {
        return Err(Error::InvalidState(
            "entity must be drawn before gravity applies".into(),
        ));
    }
    let kind = entity.collider();
    let own = entity.obstacle();
    let mut velocity = 0.0_f32;
    let mut steps = 0;

    loop {
        if config.max_steps.is_some_and(|max| steps >= max) {
            warn!("gravity gave up after {steps} steps at {:?}", entity.coords());
            return Ok(GravityOutcome { steps, stop: GravityStop::StepLimit });
        }
        velocity += config.acceleration;
        entity.move_by(0.0, velocity, false)?;
        steps += 1;

        let aabb = entity.coords();
        trace!("gravity step {steps}: v={velocity:.1} at {aabb:?}");
        let Some(link) = entity.surface() else {
            return Err(Error::InvalidState("entity lost its surface".into()));
        };
        if link.check_out_of_bounds(&aabb)? {
            return Ok(GravityOutcome { steps, stop: GravityStop::OutOfBounds });
        }
        if link.check_collision_ignoring(&aabb, kind, own)? {
            return Ok(GravityOutcome { steps, stop: GravityStop::Collided });
        }
    }
}
