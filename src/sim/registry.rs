//! Mode registry
//!
//! Static table of per-mode tunables. The spawner, the resolver and the
//! session state machine read everything from here, so adding a mode means
//! adding a row rather than branching logic.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::EngineError;

/// Available tick-driven games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Catch/sort: catch items of the selected waste category
    TrashSorter,
    /// Collection: catch every raindrop, misses are only counted
    RainwaterHero,
}

impl GameMode {
    pub const ALL: [GameMode; 2] = [GameMode::TrashSorter, GameMode::RainwaterHero];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::TrashSorter => "trash-sorter",
            GameMode::RainwaterHero => "rainwater-hero",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trash-sorter" | "sorter" | "trash" => Some(GameMode::TrashSorter),
            "rainwater-hero" | "rain" => Some(GameMode::RainwaterHero),
            _ => None,
        }
    }
}

/// Waste categories for the sorting game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WasteCategory {
    #[default]
    Organic,
    Recyclable,
    EWaste,
    Hazardous,
    Paper,
}

impl WasteCategory {
    pub const ALL: [WasteCategory; 5] = [
        WasteCategory::Organic,
        WasteCategory::Recyclable,
        WasteCategory::EWaste,
        WasteCategory::Hazardous,
        WasteCategory::Paper,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WasteCategory::Organic => "organic",
            WasteCategory::Recyclable => "recyclable",
            WasteCategory::EWaste => "ewaste",
            WasteCategory::Hazardous => "hazardous",
            WasteCategory::Paper => "paper",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "organic" => Some(WasteCategory::Organic),
            "recyclable" => Some(WasteCategory::Recyclable),
            "ewaste" | "e-waste" | "electronic" => Some(WasteCategory::EWaste),
            "hazardous" => Some(WasteCategory::Hazardous),
            "paper" => Some(WasteCategory::Paper),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WasteCategory::Organic => "Organic Waste",
            WasteCategory::Recyclable => "Recyclable Waste",
            WasteCategory::EWaste => "Electronic Waste",
            WasteCategory::Hazardous => "Hazardous Waste",
            WasteCategory::Paper => "Paper Waste",
        }
    }

    /// Item variants that fall in this category
    pub fn items(&self) -> &'static [&'static str; 5] {
        match self {
            WasteCategory::Organic => &["apple", "banana", "carrot", "leaf", "corn"],
            WasteCategory::Recyclable => &["cup", "bottle", "box", "can", "recycling"],
            WasteCategory::EWaste => &["phone", "laptop", "battery", "bulb", "tv"],
            WasteCategory::Hazardous => &["radioactive", "test-tube", "alembic", "battery", "pill"],
            WasteCategory::Paper => &["page", "newspaper", "books", "clipboard", "rolled-newspaper"],
        }
    }

    /// Category picker slot (1-based, as shown in the prompt)
    pub fn from_slot(slot: u8) -> Option<Self> {
        Self::ALL.get(usize::from(slot).checked_sub(1)?).copied()
    }
}

/// Sky theme for the collection game (cosmetic)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Sunny,
    Cloudy,
    Evening,
    Night,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Sunny, Theme::Cloudy, Theme::Evening, Theme::Night];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Sunny => "sunny",
            Theme::Cloudy => "cloudy",
            Theme::Evening => "evening",
            Theme::Night => "night",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sunny" => Some(Theme::Sunny),
            "cloudy" => Some(Theme::Cloudy),
            "evening" => Some(Theme::Evening),
            "night" => Some(Theme::Night),
            _ => None,
        }
    }

    pub fn from_slot(slot: u8) -> Option<Self> {
        Self::ALL.get(usize::from(slot).checked_sub(1)?).copied()
    }
}

/// Rain intensity tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RainIntensity {
    Mild,
    #[default]
    Normal,
    Heavy,
}

impl RainIntensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            RainIntensity::Mild => "mild",
            RainIntensity::Normal => "normal",
            RainIntensity::Heavy => "heavy",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mild" => Some(RainIntensity::Mild),
            "normal" => Some(RainIntensity::Normal),
            "heavy" => Some(RainIntensity::Heavy),
            _ => None,
        }
    }
}

/// Entity subtype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subtype {
    Waste(WasteCategory),
    Raindrop,
}

impl Subtype {
    /// Number of visual variants for this subtype
    pub fn variant_count(&self) -> usize {
        match self {
            Subtype::Waste(category) => category.items().len(),
            Subtype::Raindrop => 1,
        }
    }
}

/// Score deltas per resolution outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringTable {
    pub capture_target: i64,
    pub capture_other: i64,
    pub expire_target: i64,
    pub expire_other: i64,
}

/// Spawn cadence and fall speed range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnParams {
    pub interval: Duration,
    pub speed_min: f32,
    pub speed_max: f32,
}

/// One selectable intensity tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntensityTier {
    pub intensity: RainIntensity,
    pub spawn: SpawnParams,
}

/// Static scenery (never moves, never collides)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decoration {
    pub id: u32,
    pub pos: Vec2,
}

/// Mode-dependent start options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModeOptions {
    Sorting { target: WasteCategory },
    Collection { theme: Theme, intensity: RainIntensity },
}

impl ModeOptions {
    pub fn default_for(mode: GameMode) -> Self {
        match mode {
            GameMode::TrashSorter => ModeOptions::Sorting {
                target: WasteCategory::default(),
            },
            GameMode::RainwaterHero => ModeOptions::Collection {
                theme: Theme::default(),
                intensity: RainIntensity::default(),
            },
        }
    }

    /// Whether these options belong to `mode`
    pub fn fits(&self, mode: GameMode) -> bool {
        matches!(
            (self, mode),
            (ModeOptions::Sorting { .. }, GameMode::TrashSorter)
                | (ModeOptions::Collection { .. }, GameMode::RainwaterHero)
        )
    }

    /// Subtype the player is asked to catch, if any
    pub fn target(&self) -> Option<Subtype> {
        match self {
            ModeOptions::Sorting { target } => Some(Subtype::Waste(*target)),
            ModeOptions::Collection { .. } => None,
        }
    }
}

/// All tunables for one mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeParams {
    pub mode: GameMode,
    /// Session length in countdown ticks (seconds)
    pub duration_secs: u32,
    pub physics_interval: Duration,
    pub countdown_interval: Duration,
    /// Default spawn cadence and speed
    pub spawn: SpawnParams,
    /// Selectable tiers overriding `spawn` (empty when the mode has none)
    pub intensity_tiers: Vec<IntensityTier>,
    /// Spawn height (top boundary)
    pub spawn_y: f32,
    /// Horizontal safety margin for spawns
    pub spawn_margin: f32,
    /// Exclusive vertical capture band
    pub capture_band: (f32, f32),
    pub capture_half_width: f32,
    /// Entities with `y` beyond this are expired
    pub bottom_boundary: f32,
    pub actor_min_x: f32,
    pub actor_max_x: f32,
    pub actor_step: f32,
    pub difficulty_step: f32,
    pub difficulty_cap: f32,
    /// Probability of spawning the target subtype outright
    pub target_bias: f64,
    pub scoring: ScoringTable,
    /// Session fails once the score reaches this value
    pub failure_floor: Option<i64>,
    /// Subtypes the spawner may pick from
    pub catalog: Vec<Subtype>,
    pub decorations: Vec<Decoration>,
    /// Whether the cosmetic lightning flash rolls on countdown ticks
    pub lightning: bool,
}

impl ModeParams {
    /// Catch/sort row
    pub fn trash_sorter() -> Self {
        Self {
            mode: GameMode::TrashSorter,
            duration_secs: 90,
            physics_interval: PHYSICS_INTERVAL,
            countdown_interval: COUNTDOWN_INTERVAL,
            spawn: SpawnParams {
                interval: Duration::from_millis(1500),
                speed_min: 2.0,
                speed_max: 5.0,
            },
            intensity_tiers: Vec::new(),
            spawn_y: -50.0,
            spawn_margin: 25.0,
            capture_band: (480.0, 580.0),
            capture_half_width: 60.0,
            bottom_boundary: FIELD_HEIGHT,
            actor_min_x: 0.0,
            actor_max_x: 750.0,
            actor_step: 20.0,
            difficulty_step: 0.001,
            difficulty_cap: 3.0,
            target_bias: 0.3,
            scoring: ScoringTable {
                capture_target: 50,
                capture_other: -30,
                expire_target: -20,
                expire_other: 0,
            },
            failure_floor: Some(-50),
            catalog: WasteCategory::ALL.iter().map(|c| Subtype::Waste(*c)).collect(),
            decorations: Vec::new(),
            lightning: false,
        }
    }

    /// Collection row
    pub fn rainwater_hero() -> Self {
        let tier = |intensity, millis, speed| IntensityTier {
            intensity,
            spawn: SpawnParams {
                interval: Duration::from_millis(millis),
                speed_min: speed,
                speed_max: speed,
            },
        };
        let clouds = [(1, 100.0, 40.0), (2, 250.0, 70.0), (3, 400.0, 50.0), (4, 550.0, 80.0), (6, 150.0, 90.0)];

        Self {
            mode: GameMode::RainwaterHero,
            duration_secs: 120,
            physics_interval: PHYSICS_INTERVAL,
            countdown_interval: COUNTDOWN_INTERVAL,
            spawn: SpawnParams {
                interval: Duration::from_millis(800),
                speed_min: 3.0,
                speed_max: 3.0,
            },
            intensity_tiers: vec![
                tier(RainIntensity::Mild, 1800, 2.0),
                tier(RainIntensity::Normal, 800, 3.0),
                tier(RainIntensity::Heavy, 300, 5.0),
            ],
            spawn_y: 0.0,
            spawn_margin: 25.0,
            capture_band: (480.0, 580.0),
            capture_half_width: 80.0,
            bottom_boundary: 580.0,
            actor_min_x: 50.0,
            actor_max_x: 750.0,
            actor_step: 15.0,
            difficulty_step: 0.0,
            difficulty_cap: 1.0,
            target_bias: 0.0,
            scoring: ScoringTable {
                capture_target: 10,
                capture_other: 10,
                expire_target: 0,
                expire_other: 0,
            },
            failure_floor: None,
            catalog: vec![Subtype::Raindrop],
            decorations: clouds
                .iter()
                .map(|&(id, x, y)| Decoration { id, pos: Vec2::new(x, y) })
                .collect(),
            lightning: true,
        }
    }

    /// Spawn cadence for the given options (intensity tier if one matches)
    pub fn spawn_params(&self, options: &ModeOptions) -> SpawnParams {
        if let ModeOptions::Collection { intensity, .. } = options {
            if let Some(tier) = self.intensity_tiers.iter().find(|t| t.intensity == *intensity) {
                return tier.spawn;
            }
        }
        self.spawn
    }

    /// Reject rows that would produce degenerate sessions
    pub fn validate(&self) -> Result<(), EngineError> {
        let invalid = |reason| EngineError::InvalidModeParams { mode: self.mode, reason };

        if self.catalog.is_empty() {
            return Err(EngineError::EmptyCatalog { mode: self.mode });
        }
        if self.duration_secs == 0 {
            return Err(invalid("duration must be non-zero"));
        }
        if self.physics_interval.is_zero() || self.countdown_interval.is_zero() {
            return Err(invalid("tick intervals must be non-zero"));
        }
        let spawns = std::iter::once(&self.spawn).chain(self.intensity_tiers.iter().map(|t| &t.spawn));
        for spawn in spawns {
            if spawn.interval.is_zero() {
                return Err(invalid("spawn interval must be non-zero"));
            }
            if !spawn.speed_min.is_finite() || !spawn.speed_max.is_finite() {
                return Err(invalid("fall speeds must be finite"));
            }
            if spawn.speed_min < 0.0 || spawn.speed_min > spawn.speed_max {
                return Err(invalid("fall speed range must be non-negative and ordered"));
            }
        }
        if !(self.capture_half_width.is_finite() && self.capture_half_width >= 0.0) {
            return Err(invalid("capture half-width must be non-negative"));
        }
        if !(self.difficulty_step.is_finite() && self.difficulty_step >= 0.0) {
            return Err(invalid("difficulty step must be non-negative"));
        }
        if !(0.0..=1.0).contains(&self.target_bias) {
            return Err(invalid("target bias must lie in [0, 1]"));
        }
        if self.capture_band.0 >= self.capture_band.1 {
            return Err(invalid("capture band must be ordered"));
        }
        if self.actor_min_x < 0.0 || self.actor_max_x > FIELD_WIDTH || self.actor_min_x > self.actor_max_x {
            return Err(invalid("actor bounds must lie within the field"));
        }
        if self.spawn_margin * 2.0 >= FIELD_WIDTH {
            return Err(invalid("spawn margin leaves no room to spawn"));
        }
        if self.difficulty_cap.is_nan() || self.difficulty_cap < 1.0 {
            return Err(invalid("difficulty cap must be at least 1"));
        }
        Ok(())
    }
}

/// Table of mode rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeRegistry {
    rows: Vec<ModeParams>,
}

impl Default for ModeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ModeRegistry {
    /// Registry with the stock game constants
    pub fn builtin() -> Self {
        Self {
            rows: vec![ModeParams::trash_sorter(), ModeParams::rainwater_hero()],
        }
    }

    /// Registry with no rows
    pub fn empty() -> Self {
        Self { rows: Vec::new() }
    }

    /// Insert a row, replacing any existing row for the same mode
    pub fn insert(&mut self, params: ModeParams) {
        self.rows.retain(|row| row.mode != params.mode);
        self.rows.push(params);
    }

    pub fn get(&self, mode: GameMode) -> Result<&ModeParams, EngineError> {
        self.rows
            .iter()
            .find(|row| row.mode == mode)
            .ok_or(EngineError::UnknownMode(mode))
    }

    /// Look up and validate the row for `mode`
    pub fn params_for(&self, mode: GameMode) -> Result<&ModeParams, EngineError> {
        let params = self.get(mode)?;
        params.validate()?;
        Ok(params)
    }

    pub fn modes(&self) -> impl Iterator<Item = GameMode> + '_ {
        self.rows.iter().map(|row| row.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_rows_validate() {
        let registry = ModeRegistry::builtin();
        for mode in GameMode::ALL {
            assert!(registry.params_for(mode).is_ok(), "{mode:?} should validate");
        }
    }

    #[test]
    fn test_empty_catalog_is_fatal() {
        let mut registry = ModeRegistry::builtin();
        let mut params = ModeParams::trash_sorter();
        params.catalog.clear();
        registry.insert(params);

        let err = registry.params_for(GameMode::TrashSorter).unwrap_err();
        assert!(matches!(err, EngineError::EmptyCatalog { mode: GameMode::TrashSorter }));
        // Other modes are unaffected
        assert!(registry.params_for(GameMode::RainwaterHero).is_ok());
    }

    #[test]
    fn test_unknown_mode() {
        let registry = ModeRegistry::empty();
        assert!(matches!(
            registry.get(GameMode::RainwaterHero),
            Err(EngineError::UnknownMode(GameMode::RainwaterHero))
        ));
    }

    #[test]
    fn test_zero_spawn_interval_rejected() {
        let mut params = ModeParams::rainwater_hero();
        params.intensity_tiers[2].spawn.interval = Duration::ZERO;
        assert!(matches!(params.validate(), Err(EngineError::InvalidModeParams { .. })));
    }

    #[test]
    fn test_negative_difficulty_step_rejected() {
        let mut params = ModeParams::trash_sorter();
        params.difficulty_step = -0.01;
        assert!(matches!(params.validate(), Err(EngineError::InvalidModeParams { .. })));
    }

    #[test]
    fn test_target_bias_out_of_range_rejected() {
        for bias in [-0.1, 1.5, f64::NAN] {
            let mut params = ModeParams::trash_sorter();
            params.target_bias = bias;
            assert!(matches!(params.validate(), Err(EngineError::InvalidModeParams { .. })));
        }
    }

    #[test]
    fn test_non_finite_speeds_rejected() {
        let mut params = ModeParams::trash_sorter();
        params.spawn.speed_max = f32::INFINITY;
        assert!(params.validate().is_err());

        let mut params = ModeParams::rainwater_hero();
        params.intensity_tiers[0].spawn.speed_min = f32::NAN;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_negative_capture_half_width_rejected() {
        let mut params = ModeParams::rainwater_hero();
        params.capture_half_width = -1.0;
        assert!(matches!(params.validate(), Err(EngineError::InvalidModeParams { .. })));
    }

    #[test]
    fn test_intensity_tier_lookup() {
        let params = ModeParams::rainwater_hero();
        let heavy = params.spawn_params(&ModeOptions::Collection {
            theme: Theme::Night,
            intensity: RainIntensity::Heavy,
        });
        assert_eq!(heavy.interval, Duration::from_millis(300));
        assert_eq!(heavy.speed_min, 5.0);

        // Sorting options fall back to the default cadence
        let sorter = ModeParams::trash_sorter();
        let spawn = sorter.spawn_params(&ModeOptions::default_for(GameMode::TrashSorter));
        assert_eq!(spawn.interval, Duration::from_millis(1500));
    }

    #[test]
    fn test_category_slots() {
        assert_eq!(WasteCategory::from_slot(1), Some(WasteCategory::Organic));
        assert_eq!(WasteCategory::from_slot(5), Some(WasteCategory::Paper));
        assert_eq!(WasteCategory::from_slot(0), None);
        assert_eq!(WasteCategory::from_slot(6), None);
        assert_eq!(Theme::from_slot(4), Some(Theme::Night));
    }

    #[test]
    fn test_options_fit_mode() {
        let sorting = ModeOptions::default_for(GameMode::TrashSorter);
        assert!(sorting.fits(GameMode::TrashSorter));
        assert!(!sorting.fits(GameMode::RainwaterHero));
        assert_eq!(sorting.target(), Some(Subtype::Waste(WasteCategory::Organic)));
        assert_eq!(ModeOptions::default_for(GameMode::RainwaterHero).target(), None);
    }
}
