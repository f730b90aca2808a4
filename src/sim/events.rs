//! Notifications raised by the simulation
//!
//! Fire-and-forget: the audio layer maps each event to its own sound
//! (including multi-tone jingles); the simulation never waits on them.

use serde::{Deserialize, Serialize};

use super::state::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball bounced off a paddle
    PaddleHit { side: Side },
    /// Ball bounced off the top or bottom wall
    WallHit,
    /// A side scored a point
    Score { side: Side },
    /// Ball served
    GameStart,
    /// A side reached the win score
    GameOver { winner: Side },
    /// Menu choice accepted
    MenuSelect,
    PowerUpSpawn,
    PowerUpCollect,
}

impl GameEvent {
    /// Stable name for audio lookup
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::PaddleHit { .. } => "paddleHit",
            GameEvent::WallHit => "wallHit",
            GameEvent::Score { .. } => "score",
            GameEvent::GameStart => "gameStart",
            GameEvent::GameOver { .. } => "gameOver",
            GameEvent::MenuSelect => "menuSelect",
            GameEvent::PowerUpSpawn => "powerUpSpawn",
            GameEvent::PowerUpCollect => "powerUpCollect",
        }
    }
}
