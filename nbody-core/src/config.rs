use crate::error::{SimError, SimResult};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned simulation rectangle spanning `(0, 0)..(width, height)`.
///
/// The y-axis grows downward, matching screen space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Returns `true` if `pos` lies inside the rectangle grown outward by
    /// `margin` on all four sides. Points exactly on the grown edge count
    /// as inside.
    pub fn contains(&self, pos: Vec2, margin: f32) -> bool {
        pos.x >= -margin
            && pos.x <= self.width + margin
            && pos.y >= -margin
            && pos.y <= self.height + margin
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(1000.0, 600.0)
    }
}

/// Tunable simulation constants.
///
/// ### Fields
/// - `gravity` - Gravitational constant `G`; scales orbital speeds.
/// - `dist_eps` - Bias added to each axis of a separation vector so that
///   coincident bodies never divide by zero.
/// - `collision_eps` - Tolerance subtracted from the sum of radii before
///   a pair counts as overlapping.
/// - `bounds` - Rectangle outside of which bodies are culled.
/// - `spawn_mass` / `spawn_radius` - Properties of bodies created by the
///   drag-to-launch gesture.
/// - `seed` - Seed for the visual tag generator, `None` for OS entropy.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gravity: f32,
    pub dist_eps: f32,
    pub collision_eps: f32,
    pub bounds: Bounds,
    pub spawn_mass: f32,
    pub spawn_radius: f32,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gravity: 6.6743e2,
            dist_eps: 1e-4,
            collision_eps: 1.0,
            bounds: Bounds::default(),
            spawn_mass: 200.0,
            spawn_radius: 20.0,
            seed: None,
        }
    }
}

impl Config {
    /// Checks that every constant is in its valid range.
    ///
    /// ### Returns
    /// The first violated constraint, if any.
    pub fn validate(&self) -> SimResult<()> {
        if !(self.gravity > 0.0) {
            return Err(SimError::NonPositiveGravity(self.gravity));
        }
        if !(self.bounds.width > 0.0 && self.bounds.height > 0.0) {
            return Err(SimError::EmptyBounds {
                width: self.bounds.width,
                height: self.bounds.height,
            });
        }
        if !(self.dist_eps >= 0.0) {
            return Err(SimError::NegativeEpsilon {
                name: "dist_eps",
                value: self.dist_eps,
            });
        }
        if !(self.collision_eps >= 0.0) {
            return Err(SimError::NegativeEpsilon {
                name: "collision_eps",
                value: self.collision_eps,
            });
        }
        if !(self.spawn_mass > 0.0) {
            return Err(SimError::NonPositiveMass(self.spawn_mass));
        }
        if !(self.spawn_radius > 0.0) {
            return Err(SimError::NonPositiveRadius(self.spawn_radius));
        }
        Ok(())
    }
}
