//! Player preferences
//!
//! Serialized as JSON and persisted by the host page. Every field has a
//! default so older or partial documents still load.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::puzzle::PuzzleKind;
use crate::sim::{GameMode, ModeOptions, RainIntensity, Theme, WasteCategory};

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Trash sorter ===
    /// Category to sort for when a session starts
    pub default_category: WasteCategory,

    // === Rainwater hero ===
    pub theme: Theme,
    pub intensity: RainIntensity,

    // === Word puzzles ===
    pub puzzle_kind: PuzzleKind,

    /// Fixed RNG seed for reproducible sessions (random when unset)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_category: WasteCategory::Organic,
            theme: Theme::Sunny,
            intensity: RainIntensity::Normal,
            puzzle_kind: PuzzleKind::Scramble,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let settings = serde_json::from_str(json)?;
        log::info!("Loaded settings");
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Starting options for a mode
    pub fn options_for(&self, mode: GameMode) -> ModeOptions {
        match mode {
            GameMode::TrashSorter => ModeOptions::Sorting {
                target: self.default_category,
            },
            GameMode::RainwaterHero => ModeOptions::Collection {
                theme: self.theme,
                intensity: self.intensity,
            },
        }
    }

    /// Seed to use for the next engine
    pub fn seed_or(&self, fallback: u64) -> u64 {
        self.seed.unwrap_or(fallback)
    }
}
