//! Neon Pong - A two-paddle arcade game with a CPU opponent
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, CPU, power-ups, game flow)
//! - `settings`: Data-driven arena and gameplay tuning
//!
//! Rendering, audio and the frame scheduler live outside this crate. They feed
//! actions and elapsed time in, and read [`sim::Snapshot`] / [`sim::GameEvent`] out.

pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Largest elapsed time a single tick will integrate (seconds)
    pub const MAX_DT: f32 = 0.033;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 960.0;
    pub const ARENA_HEIGHT: f32 = 540.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 14.0;
    pub const PADDLE_HEIGHT: f32 = 110.0;
    /// Human paddle speed and CPU speed baseline (px/s)
    pub const PADDLE_SPEED: f32 = 520.0;
    /// Gap between the arena edge and the paddle's outer face
    pub const PADDLE_INSET: f32 = 30.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.0;
    pub const BALL_START_SPEED: f32 = 420.0;
    pub const BALL_MAX_SPEED: f32 = 860.0;
    /// Base speed gained on every paddle hit (additive)
    pub const BALL_SPEED_INCREMENT: f32 = 28.0;
    /// Serve spread either side of the horizontal axis (degrees)
    pub const SERVE_MAX_ANGLE_DEG: f32 = 17.0;
    /// Maximum outgoing angle off a paddle edge (radians, ~51 degrees)
    pub const BOUNCE_MAX_ANGLE: f32 = std::f32::consts::PI / 3.5;
    /// How far outside the paddle face the ball is placed after a hit
    pub const PADDLE_PUSH_OUT: f32 = 0.01;

    /// Net geometry (render only)
    pub const NET_WIDTH: f32 = 6.0;
    pub const NET_GAP: f32 = 14.0;

    /// First side to reach this many points wins
    pub const WIN_SCORE: u32 = 8;

    /// Power-up defaults
    pub const POWERUP_RADIUS: f32 = 20.0;
    pub const POWERUP_SPEED_BOOST: f32 = 2.0;
    /// Per-tick spawn probability while the ball is in play
    pub const POWERUP_SPAWN_CHANCE: f64 = 0.005;
    pub const POWERUP_MAX_ACTIVE: usize = 4;
    /// Spawn positions keep this distance from every arena edge
    pub const POWERUP_SPAWN_MARGIN: f32 = 50.0;

    /// Ball trail capacity
    pub const TRAIL_LENGTH: usize = 8;

    /// Undrained events kept before the oldest are dropped
    pub const MAX_PENDING_EVENTS: usize = 256;

    /// Scales every CPU paddle command (keeps the CPU beatable)
    pub const CPU_COMMAND_DAMPING: f32 = 0.8;
}

/// Clamp an externally supplied frame time into `[0, max_dt]`.
///
/// NaN, infinities and negative values collapse to zero.
#[inline]
pub fn sanitize_dt(dt: f32, max_dt: f32) -> f32 {
    if !dt.is_finite() || dt <= 0.0 {
        return 0.0;
    }
    dt.min(max_dt)
}

/// Scale `vel` to magnitude `speed`, keeping its direction.
///
/// A zero-length vector is returned unchanged.
#[inline]
pub fn rescale_velocity(vel: Vec2, speed: f32) -> Vec2 {
    let current = vel.length();
    if current <= f32::EPSILON {
        return vel;
    }
    vel * (speed / current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_dt() {
        assert_eq!(sanitize_dt(0.016, consts::MAX_DT), 0.016);
        assert_eq!(sanitize_dt(0.5, consts::MAX_DT), consts::MAX_DT);
        assert_eq!(sanitize_dt(-0.1, consts::MAX_DT), 0.0);
        assert_eq!(sanitize_dt(f32::NAN, consts::MAX_DT), 0.0);
        assert_eq!(sanitize_dt(f32::INFINITY, consts::MAX_DT), 0.0);
    }

    #[test]
    fn test_rescale_velocity() {
        let v = rescale_velocity(Vec2::new(3.0, 4.0), 10.0);
        assert!((v.length() - 10.0).abs() < 0.001);
        assert!((v.x - 6.0).abs() < 0.001);

        // Zero vector stays zero (no NaN)
        let z = rescale_velocity(Vec2::ZERO, 10.0);
        assert_eq!(z, Vec2::ZERO);
    }
}
