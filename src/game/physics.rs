//! Per-frame motion integration for falling items.
//!
//! Items accelerate downward and bounce off the ground strip with a restitution
//! factor; each rebound is weaker than the last, and once the rebound speed
//! drops to `REST_SPEED_CUTOFF` the body comes to rest. A rested item is a miss
//! and gets despawned by the caller.

use super::aabb::Aabb;

/// Rebound speed (px/frame) at or below which a body stops bouncing.
pub const REST_SPEED_CUTOFF: f64 = 1.0;

/// What a single integration step did to the body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepOutcome {
    /// Still airborne.
    Falling,
    /// Hit the ground this step and rebounded at the given upward speed.
    Bounced { speed: f64 },
    /// At rest on the ground (either just settled or already rested).
    Rested,
}

/// A circular falling body. Position is the circle center, velocity is
/// vertical only; items never drift horizontally.
#[derive(Clone, Copy, Debug)]
pub struct FallingBody {
    pub x: f64,
    pub y: f64,
    pub vy: f64,
    pub gravity: f64,
    pub restitution: f64,
    pub radius: f64,
    bounces: u32,
    rested: bool,
}

impl FallingBody {
    pub fn new(x: f64, y: f64, vy: f64, gravity: f64, restitution: f64, radius: f64) -> Self {
        Self {
            x,
            y,
            vy,
            gravity,
            restitution,
            radius,
            bounces: 0,
            rested: false,
        }
    }

    /// Advances the body by one frame against the ground plane at `floor_y`.
    ///
    /// Position updates before velocity, and a body that crosses the plane is
    /// clamped to sit on it before its velocity is reflected.
    pub fn step(&mut self, floor_y: f64) -> StepOutcome {
        if self.rested {
            return StepOutcome::Rested;
        }
        self.y += self.vy;
        self.vy += self.gravity;
        if self.y + self.radius > floor_y {
            self.y = floor_y - self.radius;
            let rebound = self.vy.abs() * self.restitution;
            self.bounces += 1;
            if rebound <= REST_SPEED_CUTOFF {
                self.vy = 0.0;
                self.rested = true;
                return StepOutcome::Rested;
            }
            self.vy = -rebound;
            return StepOutcome::Bounced { speed: rebound };
        }
        StepOutcome::Falling
    }

    /// Ground hits so far, counting the settling hit.
    pub fn bounces(&self) -> u32 {
        self.bounces
    }

    pub fn is_rested(&self) -> bool {
        self.rested
    }

    /// Bounding box of the circle for catch detection.
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.x, self.y, self.radius, self.radius)
    }
}
