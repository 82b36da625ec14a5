//! Time integration.
//!
//! One explicit scheme: semi-implicit (symplectic) Euler with no
//! substepping. `dt` is whatever the frame clock reports and may be zero.

use crate::body::Body;
use glam::Vec2;

/// Advances one body by `dt` under acceleration `acc`.
///
/// `vel += acc * dt`, then `pos += vel * dt` using the updated velocity.
#[inline]
pub fn integrate(body: &mut Body, acc: Vec2, dt: f32) {
    body.vel += acc * dt;
    body.pos += body.vel * dt;
}
