//! Body creation and removal rules.
//!
//! - [`Spawner`] runs the drag-to-launch state machine: a gesture start
//!   creates a pending body, drags re-aim its velocity, and a commit hands
//!   the finished body back to the caller for insertion.
//! - [`is_out_of_bounds`] is the culling predicate applied after
//!   integration.

use crate::{
    body::Body,
    config::{Bounds, Config},
    types::Rgba,
};
use glam::Vec2;
use log::trace;

/// Input events consumed by the spawner, sampled once per tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gesture {
    /// Primary action began at this world position.
    Start(Vec2),
    /// Primary action is still held, pointer at this world position.
    Drag(Vec2),
    /// Primary action released.
    Commit,
}

/// State of the pending-spawn slot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum SpawnState {
    #[default]
    Idle,
    /// A body under construction; not part of the simulated set.
    Aiming(Body),
}

#[derive(Debug, Default)]
pub struct Spawner {
    state: SpawnState,
}

impl Spawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SpawnState {
        &self.state
    }

    /// The pending body, if a gesture is in progress.
    pub fn pending(&self) -> Option<&Body> {
        match &self.state {
            SpawnState::Aiming(body) => Some(body),
            SpawnState::Idle => None,
        }
    }

    pub fn is_aiming(&self) -> bool {
        matches!(self.state, SpawnState::Aiming(_))
    }

    /// Begins a spawn at `pos` with the configured spawn mass and radius,
    /// zero velocity and the given tag.
    ///
    /// If a spawn is already pending this re-aims it instead.
    pub fn start(&mut self, pos: Vec2, cfg: &Config, tag: Rgba) {
        if self.is_aiming() {
            self.aim(pos);
            return;
        }
        trace!("spawn started at {pos}");
        self.state = SpawnState::Aiming(Body::new(
            cfg.spawn_mass,
            cfg.spawn_radius,
            pos,
            Vec2::ZERO,
            tag,
        ));
    }

    /// Sets the pending body's velocity to the drag vector
    /// `pointer - pending.pos`. Ignored while idle.
    pub fn aim(&mut self, pointer: Vec2) {
        if let SpawnState::Aiming(body) = &mut self.state {
            body.vel = pointer - body.pos;
        }
    }

    /// Finishes the gesture and returns the body to insert.
    ///
    /// ### Panics
    /// Panics if no spawn is pending. Callers must only commit a gesture
    /// they started.
    pub fn commit(&mut self) -> Body {
        match std::mem::take(&mut self.state) {
            SpawnState::Aiming(body) => body,
            SpawnState::Idle => panic!("spawn commit without a pending spawn"),
        }
    }

    /// Drops any pending spawn without committing it.
    pub fn cancel(&mut self) {
        self.state = SpawnState::Idle;
    }
}

/// Returns `true` once `body` has left `bounds` grown by its own radius.
#[inline]
pub fn is_out_of_bounds(body: &Body, bounds: &Bounds) -> bool {
    !bounds.contains(body.pos, body.radius)
}
