//! Core 2-D N-body gravity simulation library.
//!
//! Main components:
//! - [`body`] — bodies and their serializable specs.
//! - [`accel_buffer`] — per-body acceleration scratch buffer.
//! - [`forces`] — pairwise gravity and collision terms.
//! - [`integrator`] — semi-implicit Euler step.
//! - [`lifecycle`] — drag-to-launch spawning and bounds culling.
//! - [`phases`] — the per-tick accumulate / integrate / cull pipeline.
//! - [`world`] — owns the body set and runs ticks.
//! - [`scenario`] — initial-condition providers.
//! - [`config`] — simulation constants and bounds.
//! - [`error`] — validation errors.
//! - [`types`] — shared type aliases and IDs.

pub mod accel_buffer;
pub mod body;
pub mod config;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod lifecycle;
pub mod phases;
pub mod scenario;
pub mod types;
pub mod world;

pub use body::{Body, BodySpec};
pub use config::{Bounds, Config};
pub use error::{SimError, SimResult};
pub use lifecycle::Gesture;
pub use scenario::Scenario;
pub use types::{BodyId, Rgba};
pub use world::{TickReport, World};
