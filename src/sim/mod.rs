//! Deterministic simulation module
//!
//! All gameplay logic lives here. Given the same seed, settings and input
//! sequence, a session evolves identically.

pub mod collision;
pub mod cpu;
pub mod events;
pub mod fsm;
pub mod input;
pub mod powerups;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use cpu::DifficultyProfile;
pub use events::GameEvent;
pub use fsm::apply_action;
pub use input::{Action, InputLatch, Key, key_down, key_up};
pub use snapshot::{Snapshot, Status};
pub use state::{Ball, Difficulty, GameState, Paddle, Phase, PowerUp, Side, Trail, TrailPoint};
pub use tick::tick;
