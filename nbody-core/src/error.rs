use thiserror::Error;

/// Errors raised while validating simulation input.
///
/// The physics step itself never fails; these cover configuration and
/// initial conditions coming from outside the core (files, UI fields).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("body mass must be positive, got {0}")]
    NonPositiveMass(f32),
    #[error("body radius must be positive, got {0}")]
    NonPositiveRadius(f32),
    #[error("gravitational constant must be positive, got {0}")]
    NonPositiveGravity(f32),
    #[error("bounds must have positive extent, got {width}x{height}")]
    EmptyBounds { width: f32, height: f32 },
    #[error("{name} must not be negative, got {value}")]
    NegativeEpsilon { name: &'static str, value: f32 },
}

pub type SimResult<T> = Result<T, SimError>;
