/// Implemented RL algorithms
pub mod algo;

/// Implementations of strategies for time-decaying hyperparameters
pub mod decay;

/// Environment
pub mod env;

pub mod error;

/// Exploration policies
pub mod exploration;

/// Testing environments
pub mod gym;

/// Transitions
pub mod memory;

/// Human vs. agent games
pub mod play;

/// Self-play training
pub mod train;

mod util;

pub use error::{Error, Result};
pub use util::check_interval;
