//! Game state machine
//!
//! SelectingPlayers -> SelectingDifficulty (one player) -> Active <-> Won -> (reset) -> SelectingPlayers
//!
//! Actions that don't fit the current phase are ignored and reported as `false`.

use glam::Vec2;
use rand::Rng;

use super::events::GameEvent;
use super::input::Action;
use super::state::{Difficulty, GameState, Phase, Side};

/// Apply a one-shot action. Returns whether it was accepted.
pub fn apply_action(state: &mut GameState, action: Action) -> bool {
    let accepted = match action {
        Action::SelectPlayers(count) => choose_players(state, count),
        Action::SelectDifficulty(difficulty) => choose_difficulty(state, difficulty),
        Action::TogglePause => toggle_pause(state),
        Action::Reset => {
            reset(state);
            true
        }
        Action::Serve => {
            let toward = if state.rng.random_bool(0.5) {
                Side::Right
            } else {
                Side::Left
            };
            serve(state, toward)
        }
        Action::ToggleCpuSide => toggle_cpu_side(state),
    };
    if !accepted {
        log::debug!("Ignored {:?} in phase {:?}", action, state.phase);
    }
    accepted
}

/// Menu choice: one player goes on to difficulty, two players start immediately
///
/// Two-player mode leaves both paddles human (`cpu_side = None`).
pub fn choose_players(state: &mut GameState, count: u8) -> bool {
    if state.phase != Phase::SelectingPlayers {
        return false;
    }
    match count {
        1 => {
            state.phase = Phase::SelectingDifficulty;
            log::info!("One player selected, choose difficulty");
        }
        2 => {
            state.cpu_side = None;
            state.phase = Phase::Active { paused: false };
            log::info!("Two players selected");
        }
        _ => return false,
    }
    state.emit(GameEvent::MenuSelect);
    true
}

/// Menu choice: set CPU difficulty and start a one-player match
pub fn choose_difficulty(state: &mut GameState, difficulty: Difficulty) -> bool {
    if state.phase != Phase::SelectingDifficulty {
        return false;
    }
    state.difficulty = difficulty;
    state.cpu_side = Some(Side::Left);
    state.phase = Phase::Active { paused: false };
    state.emit(GameEvent::MenuSelect);
    log::info!("Difficulty {} selected, CPU plays left", difficulty.as_str());
    true
}

/// Flip the pause gate. Score and ball are untouched.
pub fn toggle_pause(state: &mut GameState) -> bool {
    match state.phase {
        Phase::Active { paused } => {
            state.phase = Phase::Active { paused: !paused };
            log::info!("{}", if paused { "Resumed" } else { "Paused" });
            true
        }
        _ => false,
    }
}

/// Put the ball in play from center toward `toward`
///
/// Only valid while a match is running, unpaused, with the ball dead.
pub fn serve(state: &mut GameState, toward: Side) -> bool {
    if state.phase != (Phase::Active { paused: false }) || state.ball.in_play {
        return false;
    }

    let max_angle = state.settings.ball.serve_max_angle_deg.to_radians();
    let angle = if max_angle > 0.0 {
        state.rng.random_range(-max_angle..=max_angle)
    } else {
        0.0
    };
    let speed = state.ball.speed;

    state.ball.pos = state.settings.center();
    state.ball.vel = Vec2::new(angle.cos() * toward.sign(), angle.sin()) * speed;
    state.ball.in_play = true;
    state.trail.clear();
    state.last_scorer = None;
    state.emit(GameEvent::GameStart);
    log::info!("Serve toward {} at {:.1} deg", toward.as_str(), angle.to_degrees());
    true
}

/// Back to the player-selection menu with a clean board. Always valid.
pub fn reset(state: &mut GameState) {
    state.left.score = 0;
    state.right.score = 0;
    state.ball.stop(&state.settings);
    state.trail.clear();
    state.power_ups.clear();
    state.center_paddles();
    state.input.release_all();
    state.last_scorer = None;
    state.phase = Phase::SelectingPlayers;
    log::info!("Reset to player selection");
}

/// Rebind the CPU to the other paddle mid-match (score and positions kept)
pub fn toggle_cpu_side(state: &mut GameState) -> bool {
    if !matches!(state.phase, Phase::Active { .. }) {
        return false;
    }
    let Some(side) = state.cpu_side else {
        return false;
    };
    let next = side.opposite();
    state.cpu_side = Some(next);
    log::info!("CPU now controls {} paddle", next.as_str());
    true
}

/// Credit `side` with a point, kill the ball and check for a winner
pub fn award_point(state: &mut GameState, side: Side) {
    state.paddle_mut(side).score += 1;
    state.ball.stop(&state.settings);
    state.trail.clear();
    state.power_ups.clear();
    state.last_scorer = Some(side);
    state.emit(GameEvent::Score { side });
    log::info!(
        "{} scores ({} - {})",
        side.as_str(),
        state.left.score,
        state.right.score
    );
    check_win(state);
}

/// Enter `Won` once either side reaches the win score
pub fn check_win(state: &mut GameState) {
    let target = state.settings.win_score;
    if state.left.score < target && state.right.score < target {
        return;
    }
    let winner = if state.left.score > state.right.score {
        Side::Left
    } else {
        Side::Right
    };
    state.ball.in_play = false;
    state.phase = Phase::Won { side: winner };
    state.emit(GameEvent::GameOver { winner });
    log::info!(
        "{} wins {} - {}",
        winner.as_str(),
        state.left.score,
        state.right.score
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::sim::state::PowerUp;

    fn new_state() -> GameState {
        GameState::new(Settings::default(), 42)
    }

    fn two_player() -> GameState {
        let mut state = new_state();
        assert!(choose_players(&mut state, 2));
        state
    }

    #[test]
    fn test_initial_phase() {
        assert_eq!(new_state().phase, Phase::SelectingPlayers);
    }

    #[test]
    fn test_one_player_flow() {
        let mut state = new_state();
        assert!(choose_players(&mut state, 1));
        assert_eq!(state.phase, Phase::SelectingDifficulty);

        assert!(choose_difficulty(&mut state, Difficulty::Easy));
        assert_eq!(state.difficulty, Difficulty::Easy);
        assert_eq!(state.cpu_side, Some(Side::Left));
        assert_eq!(state.phase, Phase::Active { paused: false });
        assert!(!state.ball.in_play);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::MenuSelect, GameEvent::MenuSelect]
        );
    }

    #[test]
    fn test_two_player_flow() {
        let state = two_player();
        assert_eq!(state.cpu_side, None);
        assert_eq!(state.phase, Phase::Active { paused: false });
    }

    #[test]
    fn test_invalid_transitions_are_noops() {
        let mut state = new_state();
        assert!(!choose_difficulty(&mut state, Difficulty::Hard));
        assert!(!toggle_pause(&mut state));
        assert!(!serve(&mut state, Side::Right));
        assert!(!choose_players(&mut state, 3));
        assert_eq!(state.phase, Phase::SelectingPlayers);
        assert!(state.events().is_empty());

        let mut state = two_player();
        assert!(!choose_players(&mut state, 1));
        assert!(!choose_difficulty(&mut state, Difficulty::Hard));
    }

    #[test]
    fn test_serve_angle_bounds() {
        let max_ratio = 17f32.to_radians().tan() + 1e-4;
        for seed in 0..50 {
            let mut state = GameState::new(Settings::default(), seed);
            choose_players(&mut state, 2);
            assert!(serve(&mut state, Side::Right));
            assert!(state.ball.in_play);
            assert!(state.ball.vel.x > 0.0);
            assert!((state.ball.vel.y / state.ball.vel.x).abs() <= max_ratio);
            assert!((state.ball.vel.length() - state.ball.speed).abs() < 0.01);
        }
    }

    #[test]
    fn test_serve_left_and_twice() {
        let mut state = two_player();
        assert!(serve(&mut state, Side::Left));
        assert!(state.ball.vel.x < 0.0);
        // Ball already in play
        assert!(!serve(&mut state, Side::Right));
        assert!(state.ball.vel.x < 0.0);
    }

    #[test]
    fn test_serve_blocked_while_paused() {
        let mut state = two_player();
        toggle_pause(&mut state);
        assert!(!serve(&mut state, Side::Right));
        assert!(!state.ball.in_play);
    }

    #[test]
    fn test_pause_toggle_keeps_ball() {
        let mut state = two_player();
        serve(&mut state, Side::Right);
        let vel = state.ball.vel;
        assert!(toggle_pause(&mut state));
        assert!(state.is_paused());
        assert_eq!(state.ball.vel, vel);
        assert!(toggle_pause(&mut state));
        assert!(!state.is_paused());
    }

    #[test]
    fn test_award_point_stops_ball() {
        let mut state = two_player();
        serve(&mut state, Side::Right);
        state.trail.record(Vec2::ONE);
        award_point(&mut state, Side::Left);

        assert_eq!(state.left.score, 1);
        assert_eq!(state.right.score, 0);
        assert!(!state.ball.in_play);
        assert_eq!(state.ball.vel, Vec2::ZERO);
        assert_eq!(state.ball.power_up_multiplier, 1.0);
        assert_eq!(state.ball.base_speed, state.settings.ball.start_speed);
        assert!(state.trail.is_empty());
        assert_eq!(state.last_scorer, Some(Side::Left));
        assert_eq!(state.phase, Phase::Active { paused: false });
    }

    #[test]
    fn test_win_threshold() {
        let mut state = two_player();
        for _ in 0..7 {
            award_point(&mut state, Side::Right);
        }
        assert_eq!(state.winner(), None);

        award_point(&mut state, Side::Right);
        assert_eq!(state.winner(), Some(Side::Right));
        assert!(!state.ball.in_play);
        assert!(state.events().contains(&GameEvent::GameOver { winner: Side::Right }));

        // Terminal until reset
        assert!(!serve(&mut state, Side::Left));
        assert!(!toggle_pause(&mut state));
    }

    #[test]
    fn test_reset_clears_state() {
        let mut state = two_player();
        serve(&mut state, Side::Right);
        award_point(&mut state, Side::Left);
        serve(&mut state, Side::Right);
        state.ball.apply_boost(2.0);
        state.trail.record(Vec2::ONE);
        let id = state.next_entity_id();
        state.power_ups.push(PowerUp {
            id,
            pos: Vec2::new(300.0, 200.0),
            radius: 20.0,
            collected: false,
            speed_boost: 2.0,
        });
        state.left.y = 0.0;
        state.input.up = true;

        reset(&mut state);
        assert_eq!(state.left.score, 0);
        assert_eq!(state.right.score, 0);
        assert_eq!(state.winner(), None);
        assert_eq!(state.phase, Phase::SelectingPlayers);
        assert!(state.trail.is_empty());
        assert!(state.power_ups.is_empty());
        assert!(!state.ball.in_play);
        assert_eq!(state.ball.speed, state.settings.ball.start_speed);
        assert_eq!(state.ball.power_up_multiplier, 1.0);
        assert_eq!(state.left.y, state.settings.centered_paddle_y());
        assert!(!state.input.up);
    }

    #[test]
    fn test_toggle_cpu_side() {
        let mut state = new_state();
        assert!(!toggle_cpu_side(&mut state));

        choose_players(&mut state, 1);
        choose_difficulty(&mut state, Difficulty::Medium);
        state.left.score = 3;
        assert!(toggle_cpu_side(&mut state));
        assert_eq!(state.cpu_side, Some(Side::Right));
        assert_eq!(state.left.score, 3);
        assert!(toggle_cpu_side(&mut state));
        assert_eq!(state.cpu_side, Some(Side::Left));

        // No CPU to rebind in two-player mode
        let mut state = two_player();
        assert!(!toggle_cpu_side(&mut state));
    }

    #[test]
    fn test_apply_action_serve_random_side() {
        let mut state = two_player();
        assert!(apply_action(&mut state, Action::Serve));
        assert!(state.ball.in_play);
        assert!(state.ball.vel.x != 0.0);
    }
}
