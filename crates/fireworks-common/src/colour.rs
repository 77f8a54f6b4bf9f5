//! RGBA colour shared by render records and particle payloads.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Linear RGBA colour. Alpha doubles as transparency.
///
/// Layout matches four consecutive `f32` values so it can sit inside GPU
/// vertex data without conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct ColourRgba {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
    /// Alpha channel (1.0 is opaque)
    pub a: f32,
}

impl ColourRgba {
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Creates a new colour.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a colour from an `[r, g, b, a]` array.
    #[must_use]
    pub const fn from_array(rgba: [f32; 4]) -> Self {
        Self::new(rgba[0], rgba[1], rgba[2], rgba[3])
    }

    /// Returns the colour as an `[r, g, b, a]` array.
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Returns a copy with every channel clamped to `0.0..=1.0`.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
            self.a.clamp(0.0, 1.0),
        )
    }
}

impl Default for ColourRgba {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[f32; 4]> for ColourRgba {
    fn from(rgba: [f32; 4]) -> Self {
        Self::from_array(rgba)
    }
}
