//! Initial-condition providers.
//!
//! A [`Scenario`] produces the body sequence a [`crate::world::World`]
//! starts from, and is re-run on every reset. The simulation never looks
//! at which scenario produced its bodies.

use crate::{
    body::{Body, BodySpec},
    config::Config,
    error::SimResult,
    types::Rgba,
};
use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scenario {
    /// A heavy central body with a light close satellite and a medium
    /// body falling in from the lower right.
    #[default]
    ThreeBody,
    /// `count` bodies at uniformly random positions, at rest.
    Scatter { count: usize, mass: f32, radius: f32 },
    /// A star at the centre with `planets` bodies on circular orbits.
    Solar { planets: usize },
    /// Explicit bodies, typically read from a settings file.
    Listed { bodies: Vec<BodySpec> },
}

impl Scenario {
    /// Default scatter: 30 bodies of mass 100.
    pub fn scatter() -> Self {
        Scenario::Scatter {
            count: 30,
            mass: 100.0,
            radius: 20.0,
        }
    }

    pub fn solar() -> Self {
        Scenario::Solar { planets: 8 }
    }

    /// Short label for UI and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Scenario::ThreeBody => "three body",
            Scenario::Scatter { .. } => "scatter",
            Scenario::Solar { .. } => "solar",
            Scenario::Listed { .. } => "listed",
        }
    }

    /// Builds the initial bodies for this scenario.
    ///
    /// ### Parameters
    /// - `cfg` - Provides the bounds, `G` and the default radius.
    /// - `rng` - Source for positions, phases and colours.
    ///
    /// ### Returns
    /// The bodies, or the error from [`Config::validate`], or the first
    /// invalid [`BodySpec`] for [`Scenario::Listed`].
    pub fn generate(&self, cfg: &Config, rng: &mut impl Rng) -> SimResult<Vec<Body>> {
        cfg.validate()?;
        match self {
            Scenario::ThreeBody => three_body(cfg),
            Scenario::Scatter {
                count,
                mass,
                radius,
            } => scatter(cfg, *count, *mass, *radius, rng),
            Scenario::Solar { planets } => Ok(solar(cfg, *planets, rng)),
            Scenario::Listed { bodies } => bodies
                .iter()
                .cloned()
                .map(|spec| spec.into_body(Rgba::random(rng)))
                .collect(),
        }
    }
}

fn three_body(cfg: &Config) -> SimResult<Vec<Body>> {
    let c = cfg.bounds.center();
    let r = cfg.spawn_radius;
    Ok(vec![
        Body::try_new(1000.0, r, c, Vec2::ZERO, Rgba::BLUE)?,
        Body::try_new(
            10.0,
            r,
            c + Vec2::new(0.0, 100.0),
            Vec2::new(81.69, 0.0),
            Rgba::GREEN,
        )?,
        Body::try_new(
            100.0,
            r,
            c + Vec2::new(200.0, 200.0),
            Vec2::new(-60.0, -60.0),
            Rgba::RED,
        )?,
    ])
}

fn scatter(
    cfg: &Config,
    count: usize,
    mass: f32,
    radius: f32,
    rng: &mut impl Rng,
) -> SimResult<Vec<Body>> {
    (0..count)
        .map(|_| {
            let pos = Vec2::new(
                rng.random_range(0.0..=cfg.bounds.width),
                rng.random_range(0.0..=cfg.bounds.height),
            );
            Body::try_new(mass, radius, pos, Vec2::ZERO, Rgba::random(rng))
        })
        .collect()
}

const STAR_MASS: f32 = 5000.0;
const STAR_RADIUS: f32 = 30.0;

fn solar(cfg: &Config, planets: usize, rng: &mut impl Rng) -> Vec<Body> {
    let c = cfg.bounds.center();
    let mut bodies = Vec::with_capacity(planets + 1);
    bodies.push(Body::new(
        STAR_MASS,
        STAR_RADIUS,
        c,
        Vec2::ZERO,
        Rgba(0xFDF9_00FF),
    ));

    let inner = STAR_RADIUS * 2.5;
    let outer = (c.x.min(c.y) - 10.0).max(inner + 1.0);

    for k in 0..planets {
        let mass = rng.random_range(2.0f32..40.0);
        let radius = 3.0 + mass.sqrt();

        // Spread orbits evenly, jittered so planets don't share a lane.
        let t = (k as f32 + rng.random_range(0.2f32..0.8)) / planets as f32;
        let orbit = inner + (outer - inner) * t;
        let dir = Vec2::from_angle(rng.random_range(0.0..TAU));

        let speed = (cfg.gravity * STAR_MASS / orbit).sqrt();
        let pos = c + dir * orbit;
        let vel = dir.perp() * speed;

        bodies.push(Body::new(mass, radius, pos, vel, Rgba::random(rng)));
    }
    bodies
}
