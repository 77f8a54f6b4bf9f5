//! # Fireworks Engine
//!
//! Headless runner for scripted firework shows.
//!
//! This crate ties the kernel to the outside world:
//! - Show configuration loaded from TOML
//! - Frame statistics averaged over a fixed interval
//! - Staging render sink holding the bytes a GPU upload would take
//! - Show runner firing scheduled launches and producing a summary

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod show;
pub mod sink;
pub mod timing;

pub use config::{ScheduledLaunch, ShowConfig};
pub use show::{Show, ShowSummary};
pub use sink::StagingSink;
pub use timing::{FrameSample, FrameStats};
