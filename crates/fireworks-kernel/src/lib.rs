//! # Fireworks Kernel
//!
//! Particle lifecycle simulation for firework shows.
//!
//! This crate provides the core simulation:
//! - Dense particle store split into render and simulation records
//! - Per-type rules dispatched through a registration table
//! - Rocket bursts, trailing stars and comets
//! - Launch presets and their settings
//! - Frame driver handing render data to a sink once per step
//!
//! ## Architecture
//!
//! Each particle is two records at the same index. The render record is laid
//! out for direct upload as a vertex buffer; the simulation record carries
//! velocity, life, the emission timer and the burst payload. Both arrays are
//! kept dense by swap-remove compaction during the step.
//!
//! ## Capacity
//!
//! The store never holds more than its capacity ([`MAX_PARTICLES`] by
//! default). Spawn requests past that are dropped silently and counted.
//!
//! ## Extending
//!
//! New particle types implement [`ParticleRule`] and are registered in the
//! simulation's [`RuleTable`]. A particle whose type has no rule fails the
//! step with [`fireworks_common::SimError::UnregisteredType`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod builtin;
pub mod driver;
pub mod launch;
pub mod particle;
pub mod random;
pub mod rules;
pub mod simulation;
pub mod store;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::builtin::*;
    pub use crate::driver::*;
    pub use crate::launch::*;
    pub use crate::particle::*;
    pub use crate::random::*;
    pub use crate::rules::*;
    pub use crate::simulation::*;
    pub use crate::store::*;
}

pub use prelude::*;
