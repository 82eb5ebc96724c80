//! Entity spawner
//!
//! Creates entities at the top of the field. Subtype selection is biased
//! toward the current target so the player always has something worth
//! catching without every item being correct.

use glam::Vec2;
use rand::Rng;

use super::registry::{ModeParams, Subtype};
use super::state::{Entity, Session};
use crate::consts::FIELD_WIDTH;

/// Create a new entity for the session's mode and options.
///
/// The entity is not inserted; the caller decides when it joins the live set.
pub fn spawn<R: Rng + ?Sized>(session: &mut Session, params: &ModeParams, rng: &mut R) -> Entity {
    let kind = pick_subtype(session.target(), params, rng);
    let variant = rng.random_range(0..kind.variant_count()) as u8;

    let margin = params.spawn_margin;
    let x = rng.random_range(margin..FIELD_WIDTH - margin);

    let spawn = params.spawn_params(&session.options);
    let base_speed = rng.random_range(spawn.speed_min..=spawn.speed_max);

    Entity {
        id: session.next_entity_id(),
        kind,
        variant,
        pos: Vec2::new(x, params.spawn_y),
        fall_speed: base_speed * session.difficulty,
    }
}

/// Weighted subtype choice: the target with probability `target_bias`,
/// otherwise uniform over the whole catalog (target included).
pub fn pick_subtype<R: Rng + ?Sized>(target: Option<Subtype>, params: &ModeParams, rng: &mut R) -> Subtype {
    debug_assert!(!params.catalog.is_empty(), "catalog validated at session start");

    if let Some(target) = target {
        if rng.random_bool(params.target_bias.clamp(0.0, 1.0)) {
            return target;
        }
    }
    params.catalog[rng.random_range(0..params.catalog.len())]
}
