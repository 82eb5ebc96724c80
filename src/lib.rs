//! Eco Games - real-time mini-game engine
//!
//! Core modules:
//! - `sim`: Tick-driven simulation (spawning, falling entities, capture, sessions)
//! - `puzzle`: Turn-based word puzzles sharing the score/level counters
//! - `report`: End-of-session reports handed to the point ledger
//! - `settings`: Player preferences (JSON, persisted by the host)
//! - `error`: Configuration errors

pub mod error;
pub mod puzzle;
pub mod report;
pub mod settings;
pub mod sim;

pub use error::EngineError;
pub use puzzle::{PuzzleKind, WordPuzzle};
pub use report::{PointLedger, SessionReport};
pub use settings::Settings;
pub use sim::{GameEngine, GameMode, ModeRegistry};

/// Play field constants
pub mod consts {
    use std::time::Duration;

    /// Play field dimensions (y grows downward)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Actor starts at the horizontal center of the field
    pub const ACTOR_START_X: f32 = FIELD_WIDTH / 2.0;

    /// Physics tick (20 Hz)
    pub const PHYSICS_INTERVAL: Duration = Duration::from_millis(50);
    /// Countdown tick
    pub const COUNTDOWN_INTERVAL: Duration = Duration::from_secs(1);

    /// Lightning flash length in physics ticks (~150 ms)
    pub const LIGHTNING_TICKS: u32 = 3;
    /// Chance of a lightning flash per countdown tick
    pub const LIGHTNING_CHANCE: f64 = 0.3;
}

/// Clamp a horizontal position into `[min, max]`
#[inline]
pub fn clamp_x(x: f32, min: f32, max: f32) -> f32 {
    x.max(min).min(max)
}
