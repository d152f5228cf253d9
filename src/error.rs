use thiserror::Error;

/// Errors produced by the crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("position {position} is out of bounds (must be 0-8)")]
    OutOfRange { position: usize },

    #[error("position {position} is already occupied")]
    Occupied { position: usize },

    #[error("game already over")]
    GameOver,

    #[error("'{input}' is not a move (expected a cell number 0-8)")]
    InvalidInput { input: String },

    #[error("invalid value {value} for `{name}`, must be in the interval [{min}, {max}]")]
    OutOfInterval {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("invalid decay schedule: {0}")]
    InvalidDecay(String),

    #[cfg(feature = "cli")]
    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Convenience alias for results carrying the crate's [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
