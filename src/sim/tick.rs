//! Per-frame simulation tick
//!
//! The scheduler calls [`tick`] once per display frame with the elapsed time.
//! Actions are applied between ticks through [`super::fsm::apply_action`].

use super::collision::{paddle_collision, scoring_side, wall_collision};
use super::events::GameEvent;
use super::state::{GameState, Side};
use super::{cpu, fsm, powerups};
use crate::sanitize_dt;

/// Advance the game state by `dt` seconds (clamped to `settings.max_dt`)
///
/// Events raised here and by actions stay queued until the caller drains
/// them with [`GameState::drain_events`], normally once per frame.
pub fn tick(state: &mut GameState, dt: f32) {
    let dt = sanitize_dt(dt, state.settings.max_dt);

    // Menus and pause freeze everything
    if !state.is_running() {
        return;
    }

    state.time_ticks += 1;

    update_paddles(state, dt);

    if !state.ball.in_play {
        state.trail.clear();
        state.power_ups.clear();
        return;
    }

    state.ball.pos += state.ball.vel * dt;

    state.trail.record(state.ball.pos);
    state.trail.age_all(dt);

    powerups::maybe_spawn(state);
    powerups::collect(state);

    if wall_collision(&mut state.ball, &state.settings) {
        log::debug!("Wall hit at x={:.0}", state.ball.pos.x);
        state.emit(GameEvent::WallHit);
    }

    for side in [Side::Left, Side::Right] {
        let paddle = state.paddle(side).clone();
        if paddle_collision(&mut state.ball, &paddle, &state.settings) {
            log::debug!(
                "{} paddle hit, base speed {:.0}",
                side.as_str(),
                state.ball.base_speed
            );
            state.emit(GameEvent::PaddleHit { side });
        }
    }

    if let Some(side) = scoring_side(&state.ball, &state.settings) {
        fsm::award_point(state, side);
    }
}

/// Move both paddles (CPU or held keys), then clamp into the arena
fn update_paddles(state: &mut GameState, dt: f32) {
    for side in [Side::Left, Side::Right] {
        if state.is_cpu_controlled(side) {
            cpu::drive_paddle(state, side, dt);
        } else {
            let dir = state.input.direction(side);
            let speed = state.settings.paddle.speed;
            state.paddle_mut(side).y += dir * speed * dt;
        }
    }

    state.left.y = state.settings.clamp_paddle_y(state.left.y);
    state.right.y = state.settings.clamp_paddle_y(state.right.y);
}
