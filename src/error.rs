//! Error taxonomy
//!
//! Nothing here is an environmental failure: every variant is either an
//! invariant violation (a logic bug) or rejected configuration. A fall is a
//! normal game outcome and is reported through callbacks, not errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// Landing classification needs a current and a next platform
    #[error("landing needs two platforms, track holds {found}")]
    InsufficientPlatforms { found: usize },

    /// Unrecognized fall mode tag
    #[error("invalid fall mode: {0:?}")]
    InvalidFallMode(String),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("settings could not be parsed")]
    Settings(#[from] serde_json::Error),

    /// `init` may only run once per game
    #[error("game already initialized")]
    AlreadyInitialized,
}
