//! Engine errors
//!
//! Only configuration defects are errors. In-session input is clamped or
//! ignored and never surfaces here.

use thiserror::Error;

use crate::sim::GameMode;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The mode's entity subtype catalog has no entries
    #[error("mode {mode:?} has an empty entity catalog")]
    EmptyCatalog { mode: GameMode },

    /// The puzzle vocabulary has no entries
    #[error("word puzzle vocabulary is empty")]
    EmptyVocabulary,

    /// A registry row has unusable tunables
    #[error("invalid parameters for mode {mode:?}: {reason}")]
    InvalidModeParams { mode: GameMode, reason: &'static str },

    /// The registry has no row for the requested mode
    #[error("mode {0:?} is not registered")]
    UnknownMode(GameMode),

    /// Preferences could not be (de)serialized
    #[error("settings: {0}")]
    Settings(#[from] serde_json::Error),
}
