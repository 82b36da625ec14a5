//! The simulation loop.
//!
//! [`World`] owns the body sequence, its index-aligned [`AccelBuffer`] and
//! the pending-spawn slot. The two sequences are only ever resized
//! together, by [`World::push_body`] and [`phases::cull_phase`], so their
//! lengths match at every tick boundary.

use crate::{
    accel_buffer::AccelBuffer,
    body::Body,
    config::Config,
    error::SimResult,
    lifecycle::{Gesture, Spawner},
    phases,
    types::{BodyId, Rgba},
};
use glam::Vec2;
use log::{debug, info, warn};
use rand::{SeedableRng, rngs::StdRng};

/// What happened to the body set during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Index of the body committed by a spawn gesture, if any.
    pub spawned: Option<BodyId>,
    /// Number of bodies removed by bounds culling.
    pub culled: usize,
}

#[derive(Debug)]
pub struct World {
    cfg: Config,
    bodies: Vec<Body>,
    acc: AccelBuffer,
    spawner: Spawner,
    rng: StdRng,
}

impl World {
    /// Creates a world from an initial body sequence.
    ///
    /// The tag generator is seeded from `cfg.seed`, or from OS entropy
    /// when no seed is set.
    ///
    /// ### Returns
    /// The error from [`Config::validate`] if `cfg` is out of range.
    pub fn new(cfg: Config, bodies: Vec<Body>) -> SimResult<Self> {
        cfg.validate()?;
        let rng = cfg
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        let acc = AccelBuffer::with_len(bodies.len());
        Ok(Self {
            cfg,
            bodies,
            acc,
            spawner: Spawner::new(),
            rng,
        })
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Replaces the constants; takes effect on the next tick. An invalid
    /// `cfg` is rejected and the current constants are kept.
    pub fn set_config(&mut self, cfg: Config) -> SimResult<()> {
        cfg.validate()?;
        self.cfg = cfg;
        Ok(())
    }

    /// Current bodies, in insertion order.
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// The body being aimed by an in-progress spawn gesture.
    pub fn pending(&self) -> Option<&Body> {
        self.spawner.pending()
    }

    /// Appends a body together with its zeroed accumulator slot.
    pub fn push_body(&mut self, body: Body) -> BodyId {
        let id = self.bodies.len();
        self.bodies.push(body);
        self.acc.push_zero();
        id
    }

    /// Replaces the whole body set, e.g. with a freshly generated scenario.
    /// Any pending spawn is dropped.
    pub fn reset(&mut self, bodies: Vec<Body>) {
        info!("world reset with {} bodies", bodies.len());
        self.acc = AccelBuffer::with_len(bodies.len());
        self.bodies = bodies;
        self.spawner.cancel();
    }

    /// Removes every body.
    pub fn clear(&mut self) {
        self.reset(Vec::new());
    }

    /// Feeds one gesture to the spawner.
    ///
    /// ### Returns
    /// The id of the inserted body if the gesture committed a spawn.
    ///
    /// ### Panics
    /// Panics on [`Gesture::Commit`] with no spawn pending.
    pub fn apply_gesture(&mut self, gesture: Gesture) -> Option<BodyId> {
        match gesture {
            Gesture::Start(pos) if self.spawner.is_aiming() => {
                self.spawner.aim(pos);
                None
            }
            Gesture::Start(pos) => {
                let tag = Rgba::random(&mut self.rng);
                self.spawner.start(pos, &self.cfg, tag);
                None
            }
            Gesture::Drag(pos) => {
                self.spawner.aim(pos);
                None
            }
            Gesture::Commit => {
                let body = self.spawner.commit();
                let id = self.push_body(body);
                debug!(
                    "spawned body {id}: mass {} at {} moving {}",
                    body.mass, body.pos, body.vel
                );
                Some(id)
            }
        }
    }

    /// Runs one tick.
    ///
    /// 1. Applies `gestures` in order (spawning may append a body).
    /// 2. [`phases::accumulation_phase`] over the current bodies.
    /// 3. [`phases::integration_phase`] with `dt`.
    /// 4. [`phases::cull_phase`] against `cfg.bounds`.
    ///
    /// A negative, infinite or NaN `dt` is treated as `0`.
    ///
    /// ### Panics
    /// Panics on a [`Gesture::Commit`] with no spawn pending.
    pub fn tick(&mut self, dt: f32, gestures: &[Gesture]) -> TickReport {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            warn!("ignoring invalid frame time {dt}");
            0.0
        };

        let mut report = TickReport::default();
        for &g in gestures {
            if let Some(id) = self.apply_gesture(g) {
                report.spawned = Some(id);
            }
        }

        phases::accumulation_phase(&self.bodies, &self.cfg, dt, &mut self.acc);
        phases::integration_phase(&mut self.bodies, &mut self.acc, dt);
        report.culled = phases::cull_phase(&mut self.bodies, &mut self.acc, &self.cfg.bounds);

        if report.culled > 0 {
            debug!(
                "culled {} bodies, {} left",
                report.culled,
                self.bodies.len()
            );
        }
        report
    }

    /// Accumulator slots, index-aligned with [`World::bodies`]. Every slot
    /// is zero between ticks.
    pub fn accelerations(&self) -> &[Vec2] {
        self.acc.as_slice()
    }
}
