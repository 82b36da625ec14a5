use crate::{
    error::{SimError, SimResult},
    types::Rgba,
};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A gravitating disc.
///
/// `mass` and `radius` are strictly positive for every body ever built;
/// [`Body::new`] and [`Body::try_new`] are the only constructors that
/// check it, so prefer them over struct literals.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub mass: f32,
    pub radius: f32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub tag: Rgba,
}

impl Body {
    /// Creates a body, panicking on a non-positive mass or radius.
    ///
    /// ### Panics
    /// Panics if `mass <= 0` or `radius <= 0` (or either is NaN).
    pub fn new(mass: f32, radius: f32, pos: Vec2, vel: Vec2, tag: Rgba) -> Self {
        assert!(mass > 0.0, "body mass must be positive, got {mass}");
        assert!(radius > 0.0, "body radius must be positive, got {radius}");
        Self {
            mass,
            radius,
            pos,
            vel,
            tag,
        }
    }

    /// Fallible counterpart of [`Body::new`] for untrusted input.
    pub fn try_new(mass: f32, radius: f32, pos: Vec2, vel: Vec2, tag: Rgba) -> SimResult<Self> {
        if !(mass > 0.0) {
            return Err(SimError::NonPositiveMass(mass));
        }
        if !(radius > 0.0) {
            return Err(SimError::NonPositiveRadius(radius));
        }
        Ok(Self::new(mass, radius, pos, vel, tag))
    }
}

/// Serializable description of a body, as found in scenario files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    pub mass: f32,
    pub radius: f32,
    pub pos: Vec2,
    #[serde(default)]
    pub vel: Vec2,
    #[serde(default)]
    pub tag: Option<Rgba>,
}

impl BodySpec {
    /// Validates the fields and turns them into a [`Body`], using `fallback`
    /// when no tag was given.
    pub fn into_body(self, fallback: Rgba) -> SimResult<Body> {
        Body::try_new(
            self.mass,
            self.radius,
            self.pos,
            self.vel,
            self.tag.unwrap_or(fallback),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic]
    fn new_panics_on_zero_mass() {
        let _ = Body::new(0.0, 1.0, Vec2::ZERO, Vec2::ZERO, Rgba::RED);
    }

    #[test]
    fn try_new_rejects_non_positive_fields() {
        assert_eq!(
            Body::try_new(-1.0, 1.0, Vec2::ZERO, Vec2::ZERO, Rgba::RED),
            Err(SimError::NonPositiveMass(-1.0))
        );
        assert_eq!(
            Body::try_new(1.0, 0.0, Vec2::ZERO, Vec2::ZERO, Rgba::RED),
            Err(SimError::NonPositiveRadius(0.0))
        );
    }

    #[test]
    fn spec_uses_fallback_tag_only_when_missing() {
        let spec = BodySpec {
            mass: 5.0,
            radius: 2.0,
            pos: Vec2::new(1.0, 2.0),
            vel: Vec2::ZERO,
            tag: None,
        };
        let body = spec.clone().into_body(Rgba::GREEN).unwrap();
        assert_eq!(body.tag, Rgba::GREEN);

        let tagged = BodySpec {
            tag: Some(Rgba::BLUE),
            ..spec
        };
        assert_eq!(tagged.into_body(Rgba::GREEN).unwrap().tag, Rgba::BLUE);
    }
}
