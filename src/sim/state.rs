//! Session state and entity types
//!
//! Everything a running game mutates lives in [`Session`]. There is no
//! ambient state: the engine owns one session at a time.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::registry::{Decoration, GameMode, ModeOptions, ModeParams, Subtype};
use crate::clamp_x;
use crate::consts::ACTOR_START_X;

/// Unique per-spawn entity identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Identity of one uninterrupted stretch of `Playing`.
///
/// A fresh token is minted on every entry into `Playing` (start, resume,
/// category confirm, play again). Timer firings carry the token they were
/// scheduled under and are discarded when it is no longer current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionToken(pub u64);

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Menu,
    Playing,
    Paused,
    Ended,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Countdown reached zero
    TimeUp,
    /// Score fell to the mode's failure floor
    ScoreFloor,
}

/// A falling game object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: Subtype,
    /// Visual variant index within the subtype
    pub variant: u8,
    pub pos: Vec2,
    /// Units per physics tick (difficulty already applied)
    pub fall_speed: f32,
}

impl Entity {
    /// Advance one physics tick
    pub fn fall(&mut self) {
        self.pos.y += self.fall_speed;
    }
}

/// The player's bin or bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub x: f32,
}

impl Default for Actor {
    fn default() -> Self {
        Self { x: ACTOR_START_X }
    }
}

impl Actor {
    /// Move by `dx`, clamped to `[min, max]`
    pub fn shift(&mut self, dx: f32, min: f32, max: f32) {
        self.x = clamp_x(self.x + dx, min, max);
    }
}

/// Per-session counters used for reporting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Captures of the target subtype (every capture in collection mode)
    pub captured_target: u32,
    pub captured_other: u32,
    pub expired_target: u32,
    pub expired_other: u32,
    /// Physics ticks processed while playing
    pub physics_ticks: u64,
    /// Countdown ticks processed while playing
    pub seconds_played: u32,
}

impl SessionStats {
    pub fn captured(&self) -> u32 {
        self.captured_target + self.captured_other
    }

    pub fn missed(&self) -> u32 {
        self.expired_target + self.expired_other
    }
}

/// One play-through of a mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub mode: GameMode,
    pub state: SessionState,
    pub options: ModeOptions,
    pub token: SessionToken,
    pub score: i64,
    pub time_remaining: u32,
    pub difficulty: f32,
    pub actor: Actor,
    /// Live entities in spawn order
    pub entities: Vec<Entity>,
    pub decorations: Vec<Decoration>,
    pub stats: SessionStats,
    /// Category prompt is showing (sorting mode, paused)
    pub category_prompt: bool,
    /// Remaining physics ticks of the lightning flash
    pub lightning_ticks: u32,
    pub end_reason: Option<EndReason>,
    next_id: u32,
}

impl Session {
    /// Fresh session in the `Menu` state for the given mode
    pub fn new(params: &ModeParams, options: ModeOptions) -> Self {
        Self {
            mode: params.mode,
            state: SessionState::Menu,
            options,
            token: SessionToken(0),
            score: 0,
            time_remaining: params.duration_secs,
            difficulty: 1.0,
            actor: Actor {
                x: clamp_x(ACTOR_START_X, params.actor_min_x, params.actor_max_x),
            },
            entities: Vec::new(),
            decorations: params.decorations.clone(),
            stats: SessionStats::default(),
            category_prompt: false,
            lightning_ticks: 0,
            end_reason: None,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Reset score, timer, entities and actor for a new play-through.
    /// Mode and options are kept.
    pub fn reset(&mut self, params: &ModeParams) {
        let options = self.options;
        *self = Session::new(params, options);
    }

    pub fn is_playing(&self) -> bool {
        self.state == SessionState::Playing
    }

    /// Subtype the player is asked to catch
    pub fn target(&self) -> Option<Subtype> {
        self.options.target()
    }

    /// Whether `kind` counts as the target (everything does without a target)
    pub fn is_target(&self, kind: Subtype) -> bool {
        self.target().is_none_or(|t| t == kind)
    }
}
