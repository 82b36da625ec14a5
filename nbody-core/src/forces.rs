//! Pairwise interaction terms.
//!
//! Every function here looks at one ordered pair `(body, other)` and
//! returns the acceleration contribution **on `body`** caused by `other`.
//! Each side of a pair is evaluated independently, so the two results
//! are opposite only up to rounding.

use crate::{body::Body, config::Config};
use glam::Vec2;

/// Separation vector from `body` to `other`, biased by `dist_eps` on each
/// axis so that it is never exactly zero.
#[inline]
pub fn separation(body: &Body, other: &Body, dist_eps: f32) -> Vec2 {
    other.pos - body.pos + Vec2::splat(dist_eps)
}

/// Reciprocal of the frame time, or `0` for a zero (paused) frame.
#[inline]
pub fn inv_dt(dt: f32) -> f32 {
    if dt != 0.0 { 1.0 / dt } else { 0.0 }
}

/// Newtonian attraction toward `other`: `r * G * m_other / |r|^3`.
///
/// ### Parameters
/// - `r` - Biased separation from [`separation`].
/// - `d2` - `r.length_squared()`.
#[inline]
pub fn gravity_accel(r: Vec2, d2: f32, other_mass: f32, gravity: f32) -> Vec2 {
    r * gravity * other_mass / d2.powf(1.5)
}

/// Overlap response between two discs, expressed as an acceleration.
///
/// Returns `None` unless the centres are closer than the sum of radii
/// minus `collision_eps`. When they overlap, the closing speed along `r`
/// is removed in proportion to the partner's share of the total mass and
/// divided by the frame time, so the correction composes additively with
/// gravity before integration.
///
/// With `inv_dt == 0` the contribution is zero.
pub fn collision_accel(
    body: &Body,
    other: &Body,
    r: Vec2,
    d2: f32,
    collision_eps: f32,
    inv_dt: f32,
) -> Option<Vec2> {
    if d2.sqrt() >= body.radius + other.radius - collision_eps {
        return None;
    }
    let v_rel = body.vel - other.vel;
    // Negative while the pair closes in along `r`, so the result points
    // away from `other`.
    let closing = -v_rel.dot(r) / d2;
    let m_total = body.mass + other.mass;
    Some(r * 2.0 * other.mass / m_total * closing * inv_dt)
}

/// Net contribution of `other` on `body`: gravity plus, if overlapping,
/// the collision term.
pub fn pair_accel(body: &Body, other: &Body, cfg: &Config, inv_dt: f32) -> Vec2 {
    let r = separation(body, other, cfg.dist_eps);
    let d2 = r.length_squared();

    let mut a = gravity_accel(r, d2, other.mass, cfg.gravity);
    if let Some(c) = collision_accel(body, other, r, d2, cfg.collision_eps, inv_dt) {
        a += c;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rgba;
    use approx::assert_relative_eq;

    fn disc(mass: f32, radius: f32, pos: Vec2, vel: Vec2) -> Body {
        Body::new(mass, radius, pos, vel, Rgba::BLUE)
    }

    #[test]
    fn gravity_points_toward_other_with_inverse_square_magnitude() {
        let a = disc(1.0, 1.0, Vec2::ZERO, Vec2::ZERO);
        let b = disc(50.0, 1.0, Vec2::new(10.0, 0.0), Vec2::ZERO);

        let r = separation(&a, &b, 0.0);
        let g = gravity_accel(r, r.length_squared(), b.mass, 2.0);

        assert_relative_eq!(g.x, 2.0 * 50.0 / 100.0, max_relative = 1e-6);
        assert_eq!(g.y, 0.0);
    }

    #[test]
    fn separation_is_biased_on_both_axes() {
        let a = disc(1.0, 1.0, Vec2::new(3.0, 3.0), Vec2::ZERO);
        let r = separation(&a, &a, 1e-4);
        assert_eq!(r, Vec2::splat(1e-4));
    }

    #[test]
    fn coincident_bodies_give_finite_acceleration() {
        let a = disc(10.0, 5.0, Vec2::new(1.0, 1.0), Vec2::new(1.0, 0.0));
        let b = disc(10.0, 5.0, Vec2::new(1.0, 1.0), Vec2::new(-1.0, 0.0));
        let cfg = Config::default();

        let acc = pair_accel(&a, &b, &cfg, inv_dt(1.0 / 60.0));
        assert!(acc.is_finite());
    }

    #[test]
    fn collision_threshold_respects_epsilon() {
        let a = disc(1.0, 10.0, Vec2::ZERO, Vec2::new(1.0, 0.0));
        let near = disc(1.0, 10.0, Vec2::new(18.0, 0.0), Vec2::ZERO);
        let far = disc(1.0, 10.0, Vec2::new(21.0, 0.0), Vec2::ZERO);

        let r = separation(&a, &far, 1e-4);
        assert!(collision_accel(&a, &far, r, r.length_squared(), 1.0, 60.0).is_none());

        let r = separation(&a, &near, 1e-4);
        assert!(collision_accel(&a, &near, r, r.length_squared(), 1.0, 60.0).is_some());
    }

    #[test]
    fn collision_pushes_approaching_body_back() {
        // `a` moves right into `b`; the correction must point left.
        let a = disc(1.0, 10.0, Vec2::ZERO, Vec2::new(5.0, 0.0));
        let b = disc(3.0, 10.0, Vec2::new(15.0, 0.0), Vec2::ZERO);

        let r = separation(&a, &b, 0.0);
        let d2 = r.length_squared();
        let c = collision_accel(&a, &b, r, d2, 1.0, 60.0).unwrap();

        // r * 2 * 3/4 * (-(5*15)/225) * 60
        let expected = 15.0 * 2.0 * 0.75 * (-75.0 / 225.0) * 60.0;
        assert_relative_eq!(c.x, expected, max_relative = 1e-5);
        assert!(c.x < 0.0);
    }

    #[test]
    fn zero_dt_disables_collision_term() {
        let a = disc(1.0, 10.0, Vec2::ZERO, Vec2::new(5.0, 0.0));
        let b = disc(1.0, 10.0, Vec2::new(5.0, 0.0), Vec2::ZERO);

        let r = separation(&a, &b, 1e-4);
        let c = collision_accel(&a, &b, r, r.length_squared(), 1.0, inv_dt(0.0)).unwrap();
        assert_eq!(c, Vec2::ZERO);
    }
}
