//! Read-only view of the simulation for the renderer

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{GameState, Phase, PowerUp, Side, TrailPoint};
use crate::settings::NetSettings;

/// What the status line / overlay should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    SelectPlayers,
    SelectDifficulty,
    /// Match running, waiting for the first serve
    AwaitingServe,
    Playing,
    Paused,
    /// A point was just scored, waiting for the next serve
    Scored { side: Side },
    Won { side: Side },
}

impl Status {
    pub fn of(state: &GameState) -> Self {
        match state.phase {
            Phase::SelectingPlayers => Status::SelectPlayers,
            Phase::SelectingDifficulty => Status::SelectDifficulty,
            Phase::Won { side } => Status::Won { side },
            Phase::Active { paused: true } => Status::Paused,
            Phase::Active { paused: false } if state.ball.in_play => Status::Playing,
            Phase::Active { paused: false } => match state.last_scorer {
                Some(side) => Status::Scored { side },
                None => Status::AwaitingServe,
            },
        }
    }

    /// Coarse category: menu / playing / paused / scored / won
    pub fn category(&self) -> &'static str {
        match self {
            Status::SelectPlayers | Status::SelectDifficulty => "menu",
            Status::AwaitingServe | Status::Playing => "playing",
            Status::Paused => "paused",
            Status::Scored { .. } => "scored",
            Status::Won { .. } => "won",
        }
    }

    /// Status line text
    pub fn message(&self) -> String {
        match self {
            Status::SelectPlayers => "Select players: press 1 or 2".to_string(),
            Status::SelectDifficulty => "Select difficulty: E, M or H".to_string(),
            Status::AwaitingServe => "Press Space to serve".to_string(),
            Status::Playing => "Playing".to_string(),
            Status::Paused => "Paused".to_string(),
            Status::Scored { side } => format!("{} scores! Space to serve", side.as_str()),
            Status::Won { side } => format!("{} wins! Press R to reset", side.as_str()),
        }
    }

    /// Large centered overlay text, if any
    pub fn overlay_text(&self) -> Option<String> {
        match self {
            Status::SelectPlayers | Status::SelectDifficulty | Status::Playing => None,
            Status::AwaitingServe | Status::Scored { .. } => Some("PRESS SPACE TO SERVE".to_string()),
            Status::Paused => Some("PAUSED".to_string()),
            Status::Won { side } => Some(format!("{} WINS!", side.as_str().to_uppercase())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddleView {
    pub pos: Vec2,
    pub size: Vec2,
    pub score: u32,
    pub cpu: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallView {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub speed: f32,
    /// Above 1.0 while boosted (renderer stretches the ball)
    pub power_up_multiplier: f32,
    pub in_play: bool,
}

/// Everything a frame needs to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub arena: Vec2,
    pub net: NetSettings,
    pub left: PaddleView,
    pub right: PaddleView,
    pub ball: BallView,
    /// Oldest first
    pub trail: Vec<TrailPoint>,
    pub power_ups: Vec<PowerUp>,
    pub status: Status,
    pub winner: Option<Side>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let settings = &state.settings;
        let size = Vec2::new(settings.paddle.width, settings.paddle.height);
        let paddle_view = |side: Side| {
            let paddle = state.paddle(side);
            PaddleView {
                pos: Vec2::new(paddle.x, paddle.y),
                size,
                score: paddle.score,
                cpu: state.is_cpu_controlled(side),
            }
        };

        Self {
            arena: Vec2::new(settings.arena.width, settings.arena.height),
            net: settings.net,
            left: paddle_view(Side::Left),
            right: paddle_view(Side::Right),
            ball: BallView {
                pos: state.ball.pos,
                vel: state.ball.vel,
                radius: settings.ball.radius,
                speed: state.ball.speed,
                power_up_multiplier: state.ball.power_up_multiplier,
                in_play: state.ball.in_play,
            },
            trail: state.trail.iter().copied().collect(),
            power_ups: state.power_ups.clone(),
            status: Status::of(state),
            winner: state.winner(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
