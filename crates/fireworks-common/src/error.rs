//! Error types for the fireworks simulation.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for fireworks operations.
#[derive(Debug, Error)]
pub enum FireworksError {
    /// Simulation core errors
    #[error("Simulation error: {0}")]
    Sim(#[from] SimError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the simulation core.
///
/// Capacity exhaustion is deliberately absent: a full store drops new
/// particles silently and reports the count instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// A particle carries a type with no entry in the rule table
    #[error("unregistered particle type: {name}")]
    UnregisteredType {
        /// Name of the particle type that has no rule
        name: &'static str,
    },

    /// Frame time was negative, NaN or infinite
    #[error("invalid frame time: {0}")]
    InvalidFrameTime(f32),
}

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the file failed
    #[error("Failed to read {path}: {source}")]
    Read {
        /// File that could not be read
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// The file contents were not valid
    #[error("Failed to parse {path}: {message}")]
    Parse {
        /// File that failed to parse
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// Writing the file failed
    #[error("Failed to write {path}: {source}")]
    Write {
        /// File that could not be written
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },
}

/// Result type alias for simulation operations.
pub type SimResult<T> = Result<T, SimError>;

/// Result type alias for fireworks operations.
pub type FireworksResult<T> = Result<T, FireworksError>;
