//! CPU opponent
//!
//! Chases the ball (or a straight-line guess of where it will cross the
//! paddle face), jittered by difficulty-dependent noise, with an eased and
//! speed-capped paddle command.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Ball, Difficulty, GameState, Side};
use crate::Settings;
use crate::consts::CPU_COMMAND_DAMPING;

/// Tuning for one difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Multiplies the paddle base speed to give the CPU's speed cap
    pub speed_factor: f32,
    /// Proportional gain from position error to paddle velocity
    pub easing: f32,
    /// Peak-to-peak width of the target jitter (px)
    pub randomness: f32,
    /// Aim at the extrapolated intercept instead of the ball's current y
    pub prediction: bool,
}

const EASY: DifficultyProfile = DifficultyProfile {
    speed_factor: 0.9,
    easing: 5.0,
    randomness: 35.0,
    prediction: false,
};

const MEDIUM: DifficultyProfile = DifficultyProfile {
    speed_factor: 1.0,
    easing: 6.5,
    randomness: 20.0,
    prediction: true,
};

const HARD: DifficultyProfile = DifficultyProfile {
    speed_factor: 1.15,
    easing: 8.0,
    randomness: 8.0,
    prediction: true,
};

impl Difficulty {
    pub fn profile(&self) -> &'static DifficultyProfile {
        match self {
            Difficulty::Easy => &EASY,
            Difficulty::Medium => &MEDIUM,
            Difficulty::Hard => &HARD,
        }
    }
}

/// Vertical position the CPU wants its paddle center at, before noise
///
/// The intercept is a plain linear extrapolation; wall bounces are not
/// modelled, so it can overshoot the arena near the top and bottom.
pub fn aim_y(ball: &Ball, side: Side, settings: &Settings, profile: &DifficultyProfile) -> f32 {
    let approaching = ball.vel.x * side.sign() > 0.0;
    if profile.prediction && approaching {
        let face_x = settings.paddle_near_face_x(side);
        let time_to_reach = ((ball.pos.x - face_x) / ball.vel.x).abs();
        ball.pos.y + ball.vel.y * time_to_reach
    } else {
        ball.pos.y
    }
}

/// Paddle displacement for this tick given the desired top edge
pub fn paddle_command(
    target_top: f32,
    current_top: f32,
    base_speed: f32,
    profile: &DifficultyProfile,
    dt: f32,
) -> f32 {
    let max_speed = base_speed * profile.speed_factor;
    let offset = target_top - current_top;
    (offset * profile.easing).clamp(-max_speed, max_speed) * dt * CPU_COMMAND_DAMPING
}

/// Steer `side`'s paddle one tick. Clamping happens afterwards in the tick.
pub fn drive_paddle(state: &mut GameState, side: Side, dt: f32) {
    let profile = state.difficulty.profile();
    let mut target = aim_y(&state.ball, side, &state.settings, profile);
    target += (state.rng.random::<f32>() - 0.5) * profile.randomness;
    let target_top = target - state.settings.paddle.height / 2.0;

    let speed = state.settings.paddle.speed;
    let paddle = state.paddle_mut(side);
    paddle.y += paddle_command(target_top, paddle.y, speed, profile, dt);
}
