use rand::Rng;
use serde::{Deserialize, Serialize};

/// Identifier for a body in a [`crate::world::World`].
///
/// This is an index into the body sequence, and is only meaningful within
/// a single tick: culling shifts the indices of every later body.
pub type BodyId = usize;

/// Opaque visual tag carried by every body, packed as `0xRRGGBBAA`.
///
/// The physics never reads it; it only travels with the body so the
/// renderer can tell bodies apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgba(pub u32);

impl Rgba {
    pub const BLUE: Rgba = Rgba(0x0079_F1FF);
    pub const GREEN: Rgba = Rgba(0x00E4_30FF);
    pub const RED: Rgba = Rgba(0xE629_37FF);

    /// Picks a uniformly random opaque colour.
    pub fn random(rng: &mut impl Rng) -> Self {
        let rgb: u32 = rng.random_range(0..=0x00FF_FFFF);
        Rgba((rgb << 8) | 0xFF)
    }

    /// Returns the `[r, g, b, a]` channels.
    pub fn to_array(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}
