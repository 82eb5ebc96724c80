//! Capture and expiry resolution
//!
//! Runs once per physics tick after positions are updated. Each live entity
//! gets at most one outcome per tick: capture is tested first, and only an
//! uncaptured entity can expire.

use serde::{Deserialize, Serialize};

use super::registry::{ModeParams, ScoringTable, Subtype};
use super::state::{Actor, Entity, EntityId, Session};

/// How an entity left the live set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Captured,
    Expired,
}

/// One resolved entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub id: EntityId,
    pub kind: Subtype,
    pub outcome: Outcome,
    /// Whether the entity matched the session target
    pub on_target: bool,
    pub delta: i64,
}

/// Whether the entity overlaps the actor's capture zone
pub fn in_capture_zone(entity: &Entity, actor: &Actor, params: &ModeParams) -> bool {
    let (top, bottom) = params.capture_band;
    let half = params.capture_half_width;
    entity.pos.y > top && entity.pos.y < bottom && entity.pos.x > actor.x - half && entity.pos.x < actor.x + half
}

/// Outcome for this tick, if any
pub fn classify(entity: &Entity, actor: &Actor, params: &ModeParams) -> Option<Outcome> {
    if in_capture_zone(entity, actor, params) {
        Some(Outcome::Captured)
    } else if entity.pos.y > params.bottom_boundary {
        Some(Outcome::Expired)
    } else {
        None
    }
}

/// Score delta from the table
pub fn score_delta(table: &ScoringTable, outcome: Outcome, on_target: bool) -> i64 {
    match (outcome, on_target) {
        (Outcome::Captured, true) => table.capture_target,
        (Outcome::Captured, false) => table.capture_other,
        (Outcome::Expired, true) => table.expire_target,
        (Outcome::Expired, false) => table.expire_other,
    }
}

/// Remove captured and expired entities, apply their deltas and counters.
///
/// Returns the summed delta; individual resolutions are appended to `out`.
pub fn resolve(session: &mut Session, params: &ModeParams, out: &mut Vec<Resolution>) -> i64 {
    let mut total = 0;
    let entities = std::mem::take(&mut session.entities);
    let mut survivors = Vec::with_capacity(entities.len());

    for entity in entities {
        let Some(outcome) = classify(&entity, &session.actor, params) else {
            survivors.push(entity);
            continue;
        };

        let on_target = session.is_target(entity.kind);
        let delta = score_delta(&params.scoring, outcome, on_target);
        total += delta;

        let stats = &mut session.stats;
        match (outcome, on_target) {
            (Outcome::Captured, true) => stats.captured_target += 1,
            (Outcome::Captured, false) => stats.captured_other += 1,
            (Outcome::Expired, true) => stats.expired_target += 1,
            (Outcome::Expired, false) => stats.expired_other += 1,
        }

        out.push(Resolution {
            id: entity.id,
            kind: entity.kind,
            outcome,
            on_target,
            delta,
        });
    }

    session.entities = survivors;
    session.score += total;
    total
}
