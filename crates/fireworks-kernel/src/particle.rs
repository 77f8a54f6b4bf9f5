//! Particle records.
//!
//! Every particle is stored as two records at the same index of two
//! parallel arrays:
//! - [`RenderRecord`]: what the renderer needs, uploaded verbatim each frame
//! - [`SimRecord`]: what the simulation needs, never leaves the CPU
//!
//! Keeping the render half small minimises the bytes pushed to the GPU per
//! frame.

use bytemuck::{Pod, Zeroable};
use fireworks_common::ColourRgba;
use glam::Vec3;

/// Type of a firework particle. Selects the rule applied in flight and on
/// expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ParticleType {
    /// Rocket that bursts into a sphere of payload stars.
    PeonyRocket = 0,
    /// Reserved rocket variant with no built-in rule.
    FancyPeonyRocket = 1,
    /// Star that fades, shrinks and slows down.
    #[default]
    StarSimple = 2,
    /// Star that leaves a trail of short-lived simple stars.
    StarSmallTrail = 3,
    /// Rocket that sheds simple stars every tick while climbing.
    CometRocket = 4,
    /// Rocket that bursts into long-lived trail stars.
    BrocadeRocket = 5,
}

impl ParticleType {
    /// Number of particle types.
    pub const COUNT: usize = 6;

    /// All particle types in discriminant order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::PeonyRocket,
        Self::FancyPeonyRocket,
        Self::StarSimple,
        Self::StarSmallTrail,
        Self::CometRocket,
        Self::BrocadeRocket,
    ];

    /// Converts from u8.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::PeonyRocket),
            1 => Some(Self::FancyPeonyRocket),
            2 => Some(Self::StarSimple),
            3 => Some(Self::StarSmallTrail),
            4 => Some(Self::CometRocket),
            5 => Some(Self::BrocadeRocket),
            _ => None,
        }
    }

    /// Index of this type in rule tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Human readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PeonyRocket => "PeonyRocket",
            Self::FancyPeonyRocket => "FancyPeonyRocket",
            Self::StarSimple => "StarSimple",
            Self::StarSmallTrail => "StarSmallTrail",
            Self::CometRocket => "CometRocket",
            Self::BrocadeRocket => "BrocadeRocket",
        }
    }
}

/// Render half of a particle, uploaded to the GPU as one vertex.
///
/// # Layout (36 bytes)
/// ```text
/// ┌──────────────────┬───────────┬────────────────────┬──────────────┐
/// │ position (3×f32) │ scale f32 │ colour (4×f32)     │ rotation f32 │
/// └──────────────────┴───────────┴────────────────────┴──────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct RenderRecord {
    /// World position.
    pub position: Vec3,
    /// Uniform scale.
    pub scale: f32,
    /// RGBA colour, alpha is transparency.
    pub colour: ColourRgba,
    /// Z rotation in degrees.
    pub rotation: f32,
}

impl Default for RenderRecord {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: 1.0,
            colour: ColourRgba::WHITE,
            rotation: 0.0,
        }
    }
}

impl RenderRecord {
    /// Size in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Creates a render record at a position.
    #[must_use]
    pub fn at(position: Vec3, scale: f32, colour: ColourRgba) -> Self {
        Self {
            position,
            scale,
            colour,
            rotation: 0.0,
        }
    }
}

/// What a particle releases when it bursts. Interpretation depends on the
/// particle type.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Payload {
    /// Type of the first payload.
    pub type_a: ParticleType,
    /// Type of the second payload.
    pub type_b: ParticleType,
    /// Count of the first payload.
    pub count_a: u32,
    /// Count of the second payload.
    pub count_b: u32,
    /// Colour of the first payload.
    pub colour_a: ColourRgba,
    /// Colour of the second payload.
    pub colour_b: ColourRgba,
}

/// Simulation half of a particle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimRecord {
    /// Particle type.
    pub kind: ParticleType,
    /// World velocity.
    pub velocity: Vec3,
    /// Remaining life in seconds; expired at or below zero.
    pub life: f32,
    /// Free-form countdown for in-flight events such as trail emission.
    pub timer: f32,
    /// Burst payload.
    pub payload: Payload,
}

impl SimRecord {
    /// Creates a simulation record with an empty payload.
    #[must_use]
    pub fn new(kind: ParticleType, velocity: Vec3, life: f32) -> Self {
        Self {
            kind,
            velocity,
            life,
            timer: 0.0,
            payload: Payload::default(),
        }
    }

    /// Sets the in-flight timer.
    #[must_use]
    pub const fn with_timer(mut self, timer: f32) -> Self {
        self.timer = timer;
        self
    }

    /// Sets the payload.
    #[must_use]
    pub const fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    /// Returns true once life has run out.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.life <= 0.0
    }
}

/// A render/simulation record pair describing one particle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Particle {
    /// Render half.
    pub render: RenderRecord,
    /// Simulation half.
    pub sim: SimRecord,
}

impl Particle {
    /// Creates a particle from its two halves.
    #[must_use]
    pub const fn new(render: RenderRecord, sim: SimRecord) -> Self {
        Self { render, sim }
    }
}
