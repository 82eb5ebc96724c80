//! Tick-driven simulation module
//!
//! All falling-entity gameplay lives here:
//! - Fixed physics/spawn/countdown timers, cancelled together
//! - Injected, seedable RNG only
//! - Stable iteration order (spawn order, monotonic entity IDs)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod engine;
pub mod input;
pub mod registry;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::{ClockIntervals, SessionClock, TimerFiring, TimerKind};
pub use collision::{Outcome, Resolution, classify, in_capture_zone, resolve, score_delta};
pub use engine::{EntityView, GameEngine, Snapshot};
pub use input::{Action, Key, route};
pub use registry::{
    Decoration, GameMode, IntensityTier, ModeOptions, ModeParams, ModeRegistry, RainIntensity, ScoringTable,
    SpawnParams, Subtype, Theme, WasteCategory,
};
pub use spawn::{pick_subtype, spawn};
pub use state::{Actor, EndReason, Entity, EntityId, Session, SessionState, SessionStats, SessionToken};
pub use tick::{GameEvent, countdown_tick, physics_tick, spawn_tick};

#[cfg(test)]
mod proptests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;
    use std::time::Duration;

    fn any_mode() -> impl Strategy<Value = GameMode> {
        prop_oneof![Just(GameMode::TrashSorter), Just(GameMode::RainwaterHero)]
    }

    fn any_key() -> impl Strategy<Value = Key> {
        prop_oneof![
            Just(Key::Left),
            Just(Key::Right),
            Just(Key::Escape),
            Just(Key::Space),
            proptest::char::range('0', '9').prop_map(Key::Char),
            proptest::sample::select(vec!['a', 'd', 'w', 'q', 'e', 'p']).prop_map(Key::Char),
        ]
    }

    proptest! {
        #[test]
        fn actor_stays_in_field(mode in any_mode(), moves in proptest::collection::vec(any::<bool>(), 0..200)) {
            let mut engine = GameEngine::new(0);
            engine.start(mode, ModeOptions::default_for(mode)).unwrap();
            for right in moves {
                engine.move_actor(if right { 1.0 } else { -1.0 });
                let x = engine.snapshot().actor_x;
                prop_assert!((0.0..=crate::consts::FIELD_WIDTH).contains(&x));
            }
        }

        #[test]
        fn entities_never_rise(seed in any::<u64>(), mode in any_mode(), steps in 1usize..400) {
            let mut engine = GameEngine::new(seed);
            engine.start(mode, ModeOptions::default_for(mode)).unwrap();
            let mut last: std::collections::HashMap<EntityId, f32> = Default::default();
            for _ in 0..steps {
                engine.advance(Duration::from_millis(50));
                for e in engine.snapshot().entities {
                    if let Some(prev) = last.insert(e.id, e.pos.y) {
                        prop_assert!(e.pos.y >= prev);
                    }
                }
            }
        }

        #[test]
        fn nothing_lingers_below_the_boundary(seed in any::<u64>(), mode in any_mode(), steps in 1usize..600) {
            let mut engine = GameEngine::new(seed);
            engine.start(mode, ModeOptions::default_for(mode)).unwrap();
            let boundary = engine.registry().get(mode).unwrap().bottom_boundary;
            for _ in 0..steps {
                engine.advance(Duration::from_millis(50));
                prop_assert!(engine.snapshot().entities.iter().all(|e| e.pos.y <= boundary));
            }
        }

        #[test]
        fn score_equals_sum_of_deltas(outcomes in proptest::collection::vec((any::<bool>(), any::<bool>()), 0..40)) {
            // (captured?, on target?) scripted against the sorting table
            let params = ModeParams::trash_sorter();
            let mut session = Session::new(&params, ModeOptions::Sorting { target: WasteCategory::Organic });
            let mut expected = 0;
            for &(captured, on_target) in &outcomes {
                let kind = if on_target {
                    Subtype::Waste(WasteCategory::Organic)
                } else {
                    Subtype::Waste(WasteCategory::Paper)
                };
                let (x, y) = if captured { (400.0, 500.0) } else { (10.0, 650.0) };
                let id = session.next_entity_id();
                session.entities.push(Entity { id, kind, variant: 0, pos: Vec2::new(x, y), fall_speed: 1.0 });
                let outcome = if captured { Outcome::Captured } else { Outcome::Expired };
                expected += score_delta(&params.scoring, outcome, on_target);
            }
            let mut out = Vec::new();
            resolve(&mut session, &params, &mut out);
            prop_assert_eq!(session.score, expected);
            prop_assert_eq!(out.len(), outcomes.len());
        }

        #[test]
        fn random_input_never_breaks_invariants(seed in any::<u64>(), mode in any_mode(),
                                                 keys in proptest::collection::vec(any_key(), 0..100)) {
            let mut engine = GameEngine::new(seed);
            engine.start(mode, ModeOptions::default_for(mode)).unwrap();
            let mut last_time = engine.snapshot().time_remaining;
            for key in keys {
                let before = engine.state();
                engine.handle_key(key);
                engine.advance(Duration::from_millis(250));
                let snap = engine.snapshot();
                prop_assert!(snap.time_remaining <= last_time);
                if before != SessionState::Playing && snap.state != SessionState::Playing {
                    prop_assert_eq!(snap.time_remaining, last_time);
                }
                last_time = snap.time_remaining;
            }
        }
    }
}
