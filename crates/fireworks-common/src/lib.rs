//! # Fireworks Common
//!
//! Common types and shared abstractions for the fireworks simulation.
//!
//! This crate provides foundational types used across the workspace:
//! - RGBA colour shared by render records and particle payloads
//! - Error types for the simulation core and configuration layer
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod colour;
pub mod error;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::colour::*;
    pub use crate::error::*;
}

pub use prelude::*;
