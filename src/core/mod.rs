//! Core engine types: RNG, round configuration, errors.

pub mod config;
pub mod error;
pub mod rng;

pub use config::GameConfig;
pub use error::{ConfigError, ConfigFileError};
pub use rng::{GameRng, GameRngState};
