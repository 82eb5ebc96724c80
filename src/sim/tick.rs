//! Periodic session actions
//!
//! One function per timer. Each mutates the session unconditionally; the
//! engine is responsible for only calling them while the session is live.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{self, Outcome, Resolution};
use super::registry::{ModeParams, RainIntensity, Subtype, Theme, WasteCategory};
use super::spawn::spawn;
use super::state::{EndReason, EntityId, Session};
use crate::consts::{LIGHTNING_CHANCE, LIGHTNING_TICKS};
use crate::report::SessionReport;

/// Things the host may want to react to (sounds, effects, bookkeeping)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Spawned { id: EntityId, kind: Subtype },
    Captured(Resolution),
    Expired(Resolution),
    ScoreChanged { score: i64 },
    Paused,
    Resumed,
    CategoryPromptOpened,
    CategoryChanged(WasteCategory),
    ThemeChanged(Theme),
    IntensityChanged(RainIntensity),
    LightningFlash,
    SessionEnded(SessionReport),
}

/// Advance every entity, grow difficulty, then resolve captures/expiries.
///
/// Returns the failure reason if the score hit the mode's floor.
pub fn physics_tick(session: &mut Session, params: &ModeParams, events: &mut Vec<GameEvent>) -> Option<EndReason> {
    session.stats.physics_ticks += 1;

    // Positions first: the resolver must see this tick's positions
    for entity in &mut session.entities {
        entity.fall();
    }
    session.difficulty = (session.difficulty + params.difficulty_step).min(params.difficulty_cap);
    session.lightning_ticks = session.lightning_ticks.saturating_sub(1);

    let mut resolved = Vec::new();
    let delta = collision::resolve(session, params, &mut resolved);
    for resolution in resolved {
        events.push(match resolution.outcome {
            Outcome::Captured => GameEvent::Captured(resolution),
            Outcome::Expired => GameEvent::Expired(resolution),
        });
    }
    if delta != 0 {
        events.push(GameEvent::ScoreChanged { score: session.score });
    }

    match params.failure_floor {
        Some(floor) if session.score <= floor => Some(EndReason::ScoreFloor),
        _ => None,
    }
}

/// Spawn one entity at the top of the field
pub fn spawn_tick<R: Rng + ?Sized>(
    session: &mut Session,
    params: &ModeParams,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    let entity = spawn(session, params, rng);
    events.push(GameEvent::Spawned {
        id: entity.id,
        kind: entity.kind,
    });
    session.entities.push(entity);
}

/// Count down one second. Returns `TimeUp` when the timer reaches zero.
pub fn countdown_tick<R: Rng + ?Sized>(
    session: &mut Session,
    params: &ModeParams,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> Option<EndReason> {
    session.time_remaining = session.time_remaining.saturating_sub(1);
    session.stats.seconds_played += 1;

    if params.lightning && rng.random_bool(LIGHTNING_CHANCE) {
        session.lightning_ticks = LIGHTNING_TICKS;
        events.push(GameEvent::LightningFlash);
    }

    (session.time_remaining == 0).then_some(EndReason::TimeUp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::registry::{GameMode, ModeOptions};
    use crate::sim::state::Entity;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn sorter() -> (Session, ModeParams) {
        let params = ModeParams::trash_sorter();
        let session = Session::new(
            &params,
            ModeOptions::Sorting {
                target: WasteCategory::Organic,
            },
        );
        (session, params)
    }

    fn push(session: &mut Session, kind: Subtype, x: f32, y: f32, speed: f32) {
        let id = session.next_entity_id();
        session.entities.push(Entity {
            id,
            kind,
            variant: 0,
            pos: Vec2::new(x, y),
            fall_speed: speed,
        });
    }

    #[test]
    fn test_physics_moves_then_resolves() {
        let (mut session, params) = sorter();
        // Starts above the band, lands inside it after this tick's move
        push(&mut session, Subtype::Waste(WasteCategory::Organic), 400.0, 478.0, 5.0);
        let mut events = Vec::new();
        let end = physics_tick(&mut session, &params, &mut events);

        assert_eq!(end, None);
        assert_eq!(session.score, 50);
        assert!(session.entities.is_empty());
        assert!(matches!(events[0], GameEvent::Captured(_)));
        assert_eq!(events[1], GameEvent::ScoreChanged { score: 50 });
    }

    #[test]
    fn test_difficulty_grows_to_cap() {
        let (mut session, params) = sorter();
        let mut events = Vec::new();
        for _ in 0..5000 {
            physics_tick(&mut session, &params, &mut events);
        }
        assert_eq!(session.difficulty, 3.0);
        assert_eq!(session.stats.physics_ticks, 5000);
    }

    #[test]
    fn test_failure_floor() {
        let (mut session, params) = sorter();
        session.score = -30;
        // A missed organic item costs 20 and lands exactly on the floor
        push(&mut session, Subtype::Waste(WasteCategory::Organic), 10.0, 599.0, 5.0);
        let mut events = Vec::new();
        assert_eq!(physics_tick(&mut session, &params, &mut events), Some(EndReason::ScoreFloor));
        assert_eq!(session.score, -50);
    }

    #[test]
    fn test_collection_has_no_floor() {
        let params = ModeParams::rainwater_hero();
        let mut session = Session::new(&params, ModeOptions::default_for(GameMode::RainwaterHero));
        session.score = -1000;
        let mut events = Vec::new();
        assert_eq!(physics_tick(&mut session, &params, &mut events), None);
    }

    #[test]
    fn test_spawn_tick_adds_entity_at_top() {
        let (mut session, params) = sorter();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut events = Vec::new();
        spawn_tick(&mut session, &params, &mut rng, &mut events);
        assert_eq!(session.entities.len(), 1);
        assert_eq!(session.entities[0].pos.y, params.spawn_y);
        assert!(matches!(events[0], GameEvent::Spawned { .. }));
    }

    #[test]
    fn test_countdown_reaches_zero_once() {
        let (mut session, params) = sorter();
        session.time_remaining = 3;
        let mut rng = Pcg32::seed_from_u64(2);
        let mut events = Vec::new();
        assert_eq!(countdown_tick(&mut session, &params, &mut rng, &mut events), None);
        assert_eq!(countdown_tick(&mut session, &params, &mut rng, &mut events), None);
        assert_eq!(countdown_tick(&mut session, &params, &mut rng, &mut events), Some(EndReason::TimeUp));
        assert_eq!(session.time_remaining, 0);
        assert_eq!(session.stats.seconds_played, 3);
    }

    #[test]
    fn test_lightning_only_in_collection() {
        let (mut session, params) = sorter();
        let mut rng = Pcg32::seed_from_u64(4);
        let mut events = Vec::new();
        for _ in 0..50 {
            countdown_tick(&mut session, &params, &mut rng, &mut events);
        }
        assert!(!events.contains(&GameEvent::LightningFlash));

        let params = ModeParams::rainwater_hero();
        let mut session = Session::new(&params, ModeOptions::default_for(GameMode::RainwaterHero));
        session.time_remaining = 1000;
        for _ in 0..50 {
            countdown_tick(&mut session, &params, &mut rng, &mut events);
        }
        assert!(events.contains(&GameEvent::LightningFlash));
    }
}
