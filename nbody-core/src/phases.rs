//! High-level simulation phases for one tick.
//!
//! The update loop run by [`crate::world::World::tick`] looks like:
//! 1. [`accumulation_phase`] — every body reads the pre-tick state of
//!    every other body and sums gravity and collision terms into an
//!    [`AccelBuffer`].
//! 2. [`integration_phase`] — each body consumes its slot and is advanced
//!    by `dt`, leaving the buffer zeroed.
//! 3. [`cull_phase`] — bodies that left the bounds are removed, together
//!    with their buffer slots.
//!
//! Accumulation only borrows the bodies immutably, so no body ever sees
//! another body's post-tick state.

use crate::{
    accel_buffer::AccelBuffer,
    body::Body,
    config::{Bounds, Config},
    forces, integrator, lifecycle,
};

/// Sums the acceleration on every body from every other body.
///
/// All `N² - N` ordered pairs are visited; there is no distance cutoff.
/// The buffer is resized (and cleared) to `bodies.len()` first via
/// [`AccelBuffer::ensure_len`].
///
/// ### Parameters
/// - `bodies` - Snapshot of the current state; only read access is required.
/// - `cfg` - Physical constants (G, epsilons).
/// - `dt` - Frame time; only used to scale the collision term, and a zero
///   `dt` disables it.
/// - `acc` - Output buffer, one slot per body.
pub fn accumulation_phase(bodies: &[Body], cfg: &Config, dt: f32, acc: &mut AccelBuffer) {
    acc.ensure_len(bodies.len());
    let inv_dt = forces::inv_dt(dt);

    for (i, body) in bodies.iter().enumerate() {
        for (j, other) in bodies.iter().enumerate() {
            if i == j {
                continue;
            }
            acc.add(i, forces::pair_accel(body, other, cfg, inv_dt));
        }
    }
}

/// Advances every body by `dt` using its accumulated acceleration.
///
/// Each slot is drained as it is consumed, so the buffer is all zeros
/// afterwards.
///
/// ### Panics
/// Panics if `acc` and `bodies` have different lengths.
pub fn integration_phase(bodies: &mut [Body], acc: &mut AccelBuffer, dt: f32) {
    assert_eq!(
        bodies.len(),
        acc.len(),
        "body and accumulator sequences out of sync"
    );
    for (i, body) in bodies.iter_mut().enumerate() {
        integrator::integrate(body, acc.take(i), dt);
    }
}

/// Removes bodies outside `bounds` (grown by each body's radius), and the
/// matching accumulator slots.
///
/// ### Returns
/// The number of bodies removed.
///
/// ### Panics
/// Panics if `acc` and `bodies` have different lengths.
pub fn cull_phase(bodies: &mut Vec<Body>, acc: &mut AccelBuffer, bounds: &Bounds) -> usize {
    assert_eq!(
        bodies.len(),
        acc.len(),
        "body and accumulator sequences out of sync"
    );
    let keep: Vec<bool> = bodies
        .iter()
        .map(|b| !lifecycle::is_out_of_bounds(b, bounds))
        .collect();
    let before = bodies.len();

    let mut i = 0;
    bodies.retain(|_| {
        let k = keep[i];
        i += 1;
        k
    });
    acc.retain_mask(&keep);

    before - bodies.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rgba;
    use approx::assert_relative_eq;
    use glam::Vec2;

    fn body_at(mass: f32, pos: Vec2) -> Body {
        Body::new(mass, 5.0, pos, Vec2::ZERO, Rgba::BLUE)
    }

    #[test]
    fn accumulation_with_no_or_one_body_is_zero() {
        let cfg = Config::default();
        let mut acc = AccelBuffer::with_len(3);

        accumulation_phase(&[], &cfg, 0.016, &mut acc);
        assert!(acc.is_empty());

        let one = [body_at(100.0, Vec2::new(50.0, 50.0))];
        accumulation_phase(&one, &cfg, 0.016, &mut acc);
        assert_eq!(acc.len(), 1);
        assert_eq!(acc.get(0), Vec2::ZERO);
    }

    #[test]
    fn equal_masses_attract_antiparallel() {
        let cfg = Config::default();
        let bodies = [
            body_at(50.0, Vec2::new(100.0, 300.0)),
            body_at(50.0, Vec2::new(700.0, 300.0)),
        ];
        let mut acc = AccelBuffer::with_len(0);

        accumulation_phase(&bodies, &cfg, 0.016, &mut acc);

        let (a0, a1) = (acc.get(0), acc.get(1));
        assert!(a0.x > 0.0 && a1.x < 0.0);
        assert_relative_eq!(a0.x, -a1.x, max_relative = 1e-4);
        assert_relative_eq!(a0.length(), a1.length(), max_relative = 1e-4);
        // Cosine of the angle between them is -1 up to the epsilon bias.
        assert_relative_eq!(a0.normalize().dot(a1.normalize()), -1.0, epsilon = 1e-5);
    }

    #[test]
    fn accumulation_reads_pre_tick_state_only() {
        let cfg = Config::default();
        let bodies = vec![
            body_at(1000.0, Vec2::new(100.0, 100.0)),
            body_at(10.0, Vec2::new(100.0, 200.0)),
            body_at(10.0, Vec2::new(300.0, 100.0)),
        ];
        let mut acc = AccelBuffer::with_len(0);
        accumulation_phase(&bodies, &cfg, 0.016, &mut acc);

        // Recomputing any single slot from the untouched snapshot must agree.
        for i in 0..bodies.len() {
            let expected = bodies
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .fold(Vec2::ZERO, |s, (_, o)| {
                    s + forces::pair_accel(&bodies[i], o, &cfg, forces::inv_dt(0.016))
                });
            assert_eq!(acc.get(i), expected);
        }
    }

    #[test]
    fn integration_drains_buffer() {
        let mut bodies = vec![body_at(1.0, Vec2::ZERO)];
        let mut acc = AccelBuffer::with_len(1);
        acc.add(0, Vec2::new(2.0, 0.0));

        integration_phase(&mut bodies, &mut acc, 0.5);

        assert_eq!(bodies[0].vel, Vec2::new(1.0, 0.0));
        assert_eq!(bodies[0].pos, Vec2::new(0.5, 0.0));
        assert_eq!(acc.get(0), Vec2::ZERO);
    }

    #[test]
    #[should_panic(expected = "out of sync")]
    fn integration_panics_on_mismatched_lengths() {
        let mut bodies = vec![body_at(1.0, Vec2::ZERO), body_at(1.0, Vec2::ONE)];
        let mut acc = AccelBuffer::with_len(1);
        integration_phase(&mut bodies, &mut acc, 0.1);
    }

    #[test]
    fn cull_removes_bodies_and_slots_together() {
        let bounds = Bounds::new(100.0, 100.0);
        let mut bodies = vec![
            body_at(1.0, Vec2::new(50.0, 50.0)),
            body_at(2.0, Vec2::new(-6.0, 50.0)),
            body_at(3.0, Vec2::new(104.0, 50.0)),
            body_at(4.0, Vec2::new(50.0, 106.0)),
        ];
        let mut acc = AccelBuffer::with_len(4);
        acc.add(2, Vec2::new(7.0, 7.0));

        let culled = cull_phase(&mut bodies, &mut acc, &bounds);

        assert_eq!(culled, 2);
        assert_eq!(bodies.len(), 2);
        assert_eq!(acc.len(), 2);
        assert_eq!(bodies[0].mass, 1.0);
        assert_eq!(bodies[1].mass, 3.0);
        // The surviving slot moved with its body.
        assert_eq!(acc.get(1), Vec2::new(7.0, 7.0));
    }
}
