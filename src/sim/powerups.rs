//! Speed power-ups: random spawning and collection by the ball

use glam::Vec2;
use rand::Rng;

use super::events::GameEvent;
use super::state::{GameState, PowerUp};

/// Roll for a new pickup this tick. Returns true if one spawned.
///
/// Only while the ball is in play and below the active cap.
pub fn maybe_spawn(state: &mut GameState) -> bool {
    if !state.ball.in_play {
        return false;
    }
    let cfg = state.settings.power_ups;
    if !state.rng.random_bool(cfg.spawn_chance) || state.power_ups.len() >= cfg.max_active {
        return false;
    }

    let arena = state.settings.arena;
    let pos = Vec2::new(
        state.rng.random_range(cfg.spawn_margin..arena.width - cfg.spawn_margin),
        state.rng.random_range(cfg.spawn_margin..arena.height - cfg.spawn_margin),
    );
    let id = state.next_entity_id();
    state.power_ups.push(PowerUp {
        id,
        pos,
        radius: cfg.radius,
        collected: false,
        speed_boost: cfg.speed_boost,
    });
    state.emit(GameEvent::PowerUpSpawn);
    log::trace!("Power-up {} spawned at ({:.0}, {:.0})", id, pos.x, pos.y);
    true
}

/// Collect every pickup the ball overlaps, stacking their boosts
///
/// Collected pickups are removed before returning. Returns how many were taken.
pub fn collect(state: &mut GameState) -> usize {
    if !state.ball.in_play {
        return 0;
    }
    let ball_radius = state.settings.ball.radius;
    let mut taken = 0;

    for power_up in state.power_ups.iter_mut().filter(|p| !p.collected) {
        if state.ball.pos.distance(power_up.pos) < ball_radius + power_up.radius {
            power_up.collected = true;
            state.ball.apply_boost(power_up.speed_boost);
            taken += 1;
            log::trace!(
                "Power-up {} collected, multiplier now {:.2}",
                power_up.id,
                state.ball.power_up_multiplier
            );
        }
    }

    for _ in 0..taken {
        state.emit(GameEvent::PowerUpCollect);
    }
    state.power_ups.retain(|p| !p.collected);
    taken
}
